//! The contact panel's message form.
//!
//! While one of its text fields has focus, every key belongs to the form:
//! movement keys and swipes must not reach the maze.

use crossterm::event::{KeyCode, KeyEvent};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Collaboration,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Message,
        Field::Collaboration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Regarding",
            Field::Message => "Message",
            Field::Collaboration => "Open to collaboration",
        }
    }

    pub fn is_text(self) -> bool {
        self != Field::Collaboration
    }

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Collaboration,
            Field::Collaboration => Field::Name,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Name => Field::Collaboration,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
            Field::Collaboration => Field::Message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub collaboration: bool,
}

impl ContactMessage {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
            Field::Collaboration => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Subject => Some(&mut self.subject),
            Field::Message => Some(&mut self.message),
            Field::Collaboration => None,
        }
    }

    /// The first required field that is still unusable.
    pub fn missing(&self) -> Option<Field> {
        [Field::Name, Field::Email, Field::Subject, Field::Message]
            .into_iter()
            .find(|&f| self.text(f).trim().is_empty())
            .or_else(|| (!self.email.contains('@')).then_some(Field::Email))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edited,
    /// Focus left the form; keys go back to the maze.
    Blurred,
    Submitted(ContactMessage),
    Rejected(Field),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    draft: ContactMessage,
    focus: Option<Field>,
}

impl ContactForm {
    pub fn draft(&self) -> &ContactMessage {
        &self.draft
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    /// True while keystrokes must be treated as typing.
    pub fn captures_typing(&self) -> bool {
        self.focus.is_some_and(Field::is_text)
    }

    pub fn focus_first(&mut self) {
        self.focus = Some(Field::Name);
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let Some(field) = self.focus else {
            return FormAction::Blurred;
        };
        match key.code {
            KeyCode::Esc => {
                self.focus = None;
                FormAction::Blurred
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Some(field.next());
                FormAction::Edited
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = Some(field.prev());
                FormAction::Edited
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if let Some(text) = self.draft.text_mut(field) {
                    text.pop();
                }
                FormAction::Edited
            }
            KeyCode::Char(' ') if field == Field::Collaboration => {
                self.draft.collaboration = !self.draft.collaboration;
                FormAction::Edited
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.draft.text_mut(field) {
                    text.push(c);
                }
                FormAction::Edited
            }
            _ => FormAction::Edited,
        }
    }

    fn submit(&mut self) -> FormAction {
        if let Some(field) = self.draft.missing() {
            self.focus = Some(field);
            return FormAction::Rejected(field);
        }
        self.focus = None;
        FormAction::Submitted(std::mem::take(&mut self.draft))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut ContactForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut form = ContactForm::default();
        form.focus_first();
        type_str(&mut form, "wasd");
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.draft().name, "was");
        assert!(form.captures_typing());
    }

    #[test]
    fn tab_cycles_through_every_field() {
        let mut form = ContactForm::default();
        form.focus_first();
        for expected in [Field::Email, Field::Subject, Field::Message, Field::Collaboration, Field::Name] {
            form.handle_key(key(KeyCode::Tab));
            assert_eq!(form.focus(), Some(expected));
        }
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Some(Field::Collaboration));
        assert!(!form.captures_typing());
    }

    #[test]
    fn back_tab_walks_fields_in_reverse() {
        let mut form = ContactForm::default();
        form.focus_first();
        for expected in [Field::Collaboration, Field::Message, Field::Subject, Field::Email, Field::Name] {
            form.handle_key(key(KeyCode::BackTab));
            assert_eq!(form.focus(), Some(expected));
        }
    }

    #[test]
    fn space_toggles_the_checkbox() {
        let mut form = ContactForm::default();
        form.focus = Some(Field::Collaboration);
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(form.draft().collaboration);
    }

    #[test]
    fn incomplete_form_is_rejected_at_first_gap() {
        let mut form = ContactForm::default();
        form.focus_first();
        type_str(&mut form, "Ada");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "ada.example.com");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Rejected(Field::Subject));
        assert_eq!(form.focus(), Some(Field::Subject));
        type_str(&mut form, "Hello");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "Hi there");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Rejected(Field::Email));
    }

    #[test]
    fn valid_submission_clears_and_blurs() {
        let mut form = ContactForm::default();
        form.draft = ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Work".into(),
            message: "Let's talk".into(),
            collaboration: true,
        };
        form.focus = Some(Field::Message);
        let FormAction::Submitted(sent) = form.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submission");
        };
        assert_eq!(sent.email, "ada@example.com");
        assert!(sent.collaboration);
        assert_eq!(form.draft(), &ContactMessage::default());
        assert!(!form.has_focus());
    }

    #[test]
    fn escape_returns_keys_to_the_maze() {
        let mut form = ContactForm::default();
        form.focus_first();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Blurred);
        assert!(!form.has_focus());
    }
}
