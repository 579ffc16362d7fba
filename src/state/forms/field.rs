//! Form field value objects

/// Lowest and highest value a scale field accepts
pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 5;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Radio group: at most one option selected
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Checkbox group: any subset of options
    MultiSelect {
        options: Vec<String>,
        checked: Vec<bool>,
    },
    /// Ordinal 1-5, `None` until answered
    Scale(Option<u8>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub required: bool,
    /// Highlighted option for choice, multi-select and scale fields
    pub cursor: usize,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
            required: false,
            cursor: 0,
        }
    }

    /// Create a radio-style field
    pub fn choice(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                selected: None,
            },
            is_multiline: false,
            required: false,
            cursor: 0,
        }
    }

    /// Create a checkbox-style field
    pub fn multi_select(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::MultiSelect {
                options: options.iter().map(|o| o.to_string()).collect(),
                checked: vec![false; options.len()],
            },
            is_multiline: false,
            required: false,
            cursor: 0,
        }
    }

    /// Create a 1-5 scale field
    pub fn scale(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Scale(None),
            is_multiline: false,
            required: false,
            cursor: 0,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_scale(&self) -> bool {
        matches!(self.value, FieldValue::Scale(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.value, FieldValue::Text(_))
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    #[cfg(test)]
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Push a character to the field value.
    ///
    /// Digits select a value on scale fields; other kinds ignore typing.
    pub fn push_char(&mut self, c: char) {
        if self.is_scale() {
            if let Some(d) = c.to_digit(10) {
                self.select_scale(d as u8);
            }
        } else if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Number of selectable options (0 for text)
    pub fn option_count(&self) -> usize {
        match &self.value {
            FieldValue::Text(_) => 0,
            FieldValue::Choice { options, .. } | FieldValue::MultiSelect { options, .. } => {
                options.len()
            }
            FieldValue::Scale(_) => (SCALE_MAX - SCALE_MIN + 1) as usize,
        }
    }

    /// Move the option cursor right (wraps around)
    pub fn next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    /// Move the option cursor left (wraps around)
    pub fn prev_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = if self.cursor == 0 {
                count - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Activate the option under the cursor.
    ///
    /// Choices and scales replace the current selection, multi-selects toggle.
    pub fn activate_option(&mut self) {
        let cursor = self.cursor;
        if self.is_scale() {
            self.select_scale(cursor as u8 + SCALE_MIN);
            return;
        }
        match &mut self.value {
            FieldValue::Text(_) | FieldValue::Scale(_) => {}
            FieldValue::Choice { options, selected } => {
                if cursor < options.len() {
                    *selected = Some(cursor);
                }
            }
            FieldValue::MultiSelect { checked, .. } => {
                if let Some(flag) = checked.get_mut(cursor) {
                    *flag = !*flag;
                }
            }
        }
    }

    /// Select a scale value; out of range values are ignored
    pub fn select_scale(&mut self, value: u8) {
        if let FieldValue::Scale(current) = &mut self.value {
            if (SCALE_MIN..=SCALE_MAX).contains(&value) {
                *current = Some(value);
                self.cursor = (value - SCALE_MIN) as usize;
            }
        }
    }

    /// Select a choice option by its label
    #[cfg(test)]
    pub fn select_option(&mut self, option: &str) {
        match &mut self.value {
            FieldValue::Choice { options, selected } => {
                if let Some(idx) = options.iter().position(|o| o == option) {
                    *selected = Some(idx);
                }
            }
            FieldValue::MultiSelect { options, checked } => {
                if let Some(idx) = options.iter().position(|o| o == option) {
                    checked[idx] = true;
                }
            }
            _ => {}
        }
    }

    /// Stored value of a scale field, empty when unanswered
    pub fn scale_value(&self) -> String {
        match &self.value {
            FieldValue::Scale(Some(v)) => v.to_string(),
            _ => String::new(),
        }
    }

    /// Whether a required field holds an answer
    pub fn is_answered(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Choice { selected, .. } => selected.is_some(),
            FieldValue::MultiSelect { checked, .. } => checked.iter().any(|c| *c),
            FieldValue::Scale(v) => v.is_some(),
        }
    }

    /// Raw `(name, value)` entries the field contributes to submitted form data.
    ///
    /// Text fields and scales always contribute one entry, a choice only when
    /// selected, and a multi-select one entry per checked option.
    pub fn raw_entries(&self) -> Vec<(String, String)> {
        match &self.value {
            FieldValue::Text(s) => vec![(self.name.clone(), s.clone())],
            FieldValue::Choice { options, selected } => selected
                .and_then(|idx| options.get(idx))
                .map(|o| vec![(self.name.clone(), o.clone())])
                .unwrap_or_default(),
            FieldValue::MultiSelect { options, checked } => options
                .iter()
                .zip(checked)
                .filter(|(_, c)| **c)
                .map(|(o, _)| (self.name.clone(), o.clone()))
                .collect(),
            FieldValue::Scale(_) => vec![(self.name.clone(), self.scale_value())],
        }
    }
}
