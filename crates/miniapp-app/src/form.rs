//! Profile editing state.
//!
//! [`ProfileForm`] owns one [`TextInput`] per text field plus the two tag
//! sets and their pending-tag inputs. It only edits; the [`crate::App`]
//! decides what an edit means for the save indicator and status line.

use miniapp_core::{ProfileRecord, TagInsert, TagSet};

use crate::KeyInput;

/// Single-line text buffer with a cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    /// Input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Current text.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the text, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Apply an editing key. Returns true if the text changed.
    pub fn apply(&mut self, key: KeyInput) -> bool {
        let len = self.buffer.chars().count();
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                true
            },
            KeyInput::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Delete if self.cursor < len => {
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            },
            KeyInput::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            },
            KeyInput::Home => {
                self.cursor = 0;
                false
            },
            KeyInput::End => {
                self.cursor = len;
                false
            },
            _ => false,
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

/// Focusable rows of the profile form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// First name.
    #[default]
    FirstName,
    /// Last name.
    LastName,
    /// Profession.
    Profession,
    /// Hobby tags.
    Hobbies,
    /// Interest tags.
    Interests,
    /// About text.
    About,
    /// Save button row.
    Save,
}

impl FormField {
    /// Rows in display order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Profession,
        Self::Hobbies,
        Self::Interests,
        Self::About,
        Self::Save,
    ];

    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Profession => "Profession",
            Self::Hobbies => "Hobbies",
            Self::Interests => "Interests",
            Self::About => "About",
            Self::Save => "Save",
        }
    }

    /// Input hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "Enter first name",
            Self::LastName => "Enter last name",
            Self::Profession => "e.g. Developer, Designer",
            Self::Hobbies => "e.g. Photography (Enter to add)",
            Self::Interests => "e.g. Technology (Enter to add)",
            Self::About => "Tell about yourself...",
            Self::Save => "",
        }
    }

    /// True for the two tag fields.
    pub fn is_tags(self) -> bool {
        matches!(self, Self::Hobbies | Self::Interests)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or_default()
    }

    /// Following row, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding row, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Result of a form edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    /// Nothing changed (cursor movement or an inapplicable key).
    None,
    /// Field text changed.
    Edited,
    /// Enter on a tag field tried to add the pending tag.
    Tag {
        /// Field the tag belongs to.
        field: FormField,
        /// Tag text as typed.
        tag: String,
        /// Outcome.
        outcome: TagInsert,
    },
    /// Backspace on an empty tag input removed the last tag.
    TagRemoved {
        /// Field the tag belonged to.
        field: FormField,
        /// Removed tag.
        tag: String,
    },
}

/// Editable profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    first_name: TextInput,
    last_name: TextInput,
    profession: TextInput,
    hobbies: TagSet,
    hobby_input: TextInput,
    interests: TagSet,
    interest_input: TextInput,
    about: TextInput,
    focus: FormField,
}

impl ProfileForm {
    /// Form showing `record`, focus on the first field.
    pub fn from_record(record: ProfileRecord) -> Self {
        Self {
            first_name: TextInput::new(record.first_name),
            last_name: TextInput::new(record.last_name),
            profession: TextInput::new(record.profession),
            hobbies: record.hobbies,
            hobby_input: TextInput::default(),
            interests: record.interests,
            interest_input: TextInput::default(),
            about: TextInput::new(record.about),
            focus: FormField::FirstName,
        }
    }

    /// Current values as a record. Pending tag input is not included.
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            first_name: self.first_name.as_str().to_string(),
            last_name: self.last_name.as_str().to_string(),
            profession: self.profession.as_str().to_string(),
            hobbies: self.hobbies.clone(),
            interests: self.interests.clone(),
            about: self.about.as_str().to_string(),
        }
    }

    /// Focused row.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Move focus to `field`.
    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    /// Move focus down one row.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus up one row.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Text input of a field. For tag fields this is the pending tag.
    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::FirstName => Some(&self.first_name),
            FormField::LastName => Some(&self.last_name),
            FormField::Profession => Some(&self.profession),
            FormField::Hobbies => Some(&self.hobby_input),
            FormField::Interests => Some(&self.interest_input),
            FormField::About => Some(&self.about),
            FormField::Save => None,
        }
    }

    fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::FirstName => Some(&mut self.first_name),
            FormField::LastName => Some(&mut self.last_name),
            FormField::Profession => Some(&mut self.profession),
            FormField::Hobbies => Some(&mut self.hobby_input),
            FormField::Interests => Some(&mut self.interest_input),
            FormField::About => Some(&mut self.about),
            FormField::Save => None,
        }
    }

    /// Tag set of a tag field.
    pub fn tags(&self, field: FormField) -> Option<&TagSet> {
        match field {
            FormField::Hobbies => Some(&self.hobbies),
            FormField::Interests => Some(&self.interests),
            _ => None,
        }
    }

    fn tags_mut(&mut self, field: FormField) -> Option<&mut TagSet> {
        match field {
            FormField::Hobbies => Some(&mut self.hobbies),
            FormField::Interests => Some(&mut self.interests),
            _ => None,
        }
    }

    /// Apply an editing key to the focused field.
    pub fn edit(&mut self, key: KeyInput) -> FormChange {
        let field = self.focus;

        if field.is_tags()
            && key == KeyInput::Backspace
            && self.input(field).is_some_and(TextInput::is_empty)
        {
            return match self.tags_mut(field).and_then(TagSet::pop) {
                Some(tag) => FormChange::TagRemoved { field, tag },
                None => FormChange::None,
            };
        }

        if self.input_mut(field).is_some_and(|input| input.apply(key)) {
            FormChange::Edited
        } else {
            FormChange::None
        }
    }

    /// Enter on the focused field.
    ///
    /// Tag fields add the pending tag; a rejected tag stays in the input so it
    /// can be corrected. Other fields move focus down.
    pub fn enter(&mut self) -> FormChange {
        let field = self.focus;
        if !field.is_tags() {
            self.focus_next();
            return FormChange::None;
        }

        let tag = self.input(field).map(|i| i.as_str().to_string()).unwrap_or_default();
        let outcome = self.tags_mut(field).map_or(TagInsert::Empty, |tags| tags.insert(&tag));

        if matches!(outcome, TagInsert::Added | TagInsert::Empty)
            && let Some(input) = self.input_mut(field)
        {
            let _ = input.take();
        }

        FormChange::Tag { field, tag: tag.trim().to_string(), outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut ProfileForm, text: &str) {
        for c in text.chars() {
            let _ = form.edit(KeyInput::Char(c));
        }
    }

    #[test]
    fn text_input_handles_multibyte_cursor() {
        let mut input = TextInput::new("Имя");
        assert_eq!(input.cursor(), 3);
        input.apply(KeyInput::Left);
        input.apply(KeyInput::Char('x'));
        assert_eq!(input.as_str(), "Имxя");
        input.apply(KeyInput::Home);
        input.apply(KeyInput::Delete);
        assert_eq!(input.as_str(), "мxя");
        input.apply(KeyInput::End);
        assert!(input.apply(KeyInput::Backspace));
        assert_eq!(input.as_str(), "мx");
        input.apply(KeyInput::Home);
        assert!(!input.apply(KeyInput::Backspace));
    }

    #[test]
    fn focus_wraps() {
        assert_eq!(FormField::Save.next(), FormField::FirstName);
        assert_eq!(FormField::FirstName.prev(), FormField::Save);
        assert_eq!(FormField::Hobbies.next(), FormField::Interests);
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut form = ProfileForm::default();
        type_text(&mut form, "Ada");
        form.focus_next();
        type_text(&mut form, "Lovelace");

        let record = form.to_record();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
    }

    #[test]
    fn enter_adds_tags_up_to_cap() {
        let mut form = ProfileForm::default();
        form.set_focus(FormField::Hobbies);

        for tag in ["a", "b", "c", "d", "e"] {
            type_text(&mut form, tag);
            assert!(matches!(form.enter(), FormChange::Tag { outcome: TagInsert::Added, .. }));
        }

        type_text(&mut form, "f");
        assert!(matches!(form.enter(), FormChange::Tag { outcome: TagInsert::Full, .. }));
        assert_eq!(form.to_record().hobbies.len(), 5);
        assert_eq!(form.input(FormField::Hobbies).map(TextInput::as_str), Some("f"));
    }

    #[test]
    fn duplicate_tag_is_reported() {
        let mut form = ProfileForm::default();
        form.set_focus(FormField::Interests);
        type_text(&mut form, "art");
        let _ = form.enter();
        type_text(&mut form, "art");

        assert_eq!(form.enter(), FormChange::Tag {
            field: FormField::Interests,
            tag: "art".into(),
            outcome: TagInsert::Duplicate
        });
        assert_eq!(form.to_record().interests.len(), 1);
    }

    #[test]
    fn backspace_on_empty_tag_input_removes_last_tag() {
        let mut form = ProfileForm::from_record(ProfileRecord {
            hobbies: TagSet::from_comma_list("a, b"),
            ..ProfileRecord::default()
        });
        form.set_focus(FormField::Hobbies);

        assert_eq!(form.edit(KeyInput::Backspace), FormChange::TagRemoved {
            field: FormField::Hobbies,
            tag: "b".into()
        });
        assert_eq!(form.to_record().hobbies.joined(), "a");
    }

    #[test]
    fn enter_on_text_field_moves_focus() {
        let mut form = ProfileForm::default();
        assert_eq!(form.enter(), FormChange::None);
        assert_eq!(form.focus(), FormField::LastName);
    }

    #[test]
    fn record_round_trip() {
        let record = ProfileRecord {
            first_name: "A".into(),
            last_name: "B".into(),
            profession: "C".into(),
            hobbies: TagSet::from_comma_list("x"),
            interests: TagSet::from_comma_list("y, z"),
            about: "D".into(),
        };
        assert_eq!(ProfileForm::from_record(record.clone()).to_record(), record);
    }
}
