//! Application state and input handling
//!
//! `App` owns the one `FormState` of the session. Key events are turned
//! into form events, applied, and the next state replaces the current one.

use crate::config::RegistrationConfig;
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{
    Catalog, FieldName, FormEvent, FormField, FormState, JobRole, PaymentMethod, RegistrationForm,
    ShirtDesign, ShirtSize, SubmitDecision, EXPIRATION_MONTHS, EXPIRATION_YEARS,
};
use crate::submit::{Registration, RegistrationSink};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A focusable control on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Name,
    Email,
    JobRole,
    OtherJobRole,
    ShirtSize,
    ShirtDesign,
    ShirtColor,
    /// Index into the activity catalog
    Activity(usize),
    PaymentMethod,
    CardNumber,
    Zip,
    Cvv,
    ExpMonth,
    ExpYear,
    Register,
}

impl Control {
    /// The validated field this control edits, if any
    pub fn field(&self) -> Option<FieldName> {
        match self {
            Self::Name => Some(FieldName::Name),
            Self::Email => Some(FieldName::Email),
            Self::Activity(_) => Some(FieldName::Activities),
            Self::CardNumber => Some(FieldName::CreditCardNumber),
            Self::Zip => Some(FieldName::Zip),
            Self::Cvv => Some(FieldName::Cvv),
            _ => None,
        }
    }

    fn for_field(field: FieldName) -> Self {
        match field {
            FieldName::Name => Self::Name,
            FieldName::Email => Self::Email,
            FieldName::Activities => Self::Activity(0),
            FieldName::CreditCardNumber => Self::CardNumber,
            FieldName::Zip => Self::Zip,
            FieldName::Cvv => Self::Cvv,
        }
    }

    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Email | Self::OtherJobRole | Self::CardNumber | Self::Zip | Self::Cvv
        )
    }
}

/// Overlay shown after a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Submission blocked by these fields
    Blocked(Vec<FieldName>),
    Accepted { name: String, total_cost: u32 },
    Error(String),
}

/// Main application struct
pub struct App {
    pub catalog: Catalog,
    pub state: FormState,
    pub focus: Control,
    pub dialog: Option<Dialog>,
    default_payment_method: PaymentMethod,
    sink: Box<dyn RegistrationSink>,
    quit: bool,
}

impl App {
    pub fn new(config: &RegistrationConfig, sink: Box<dyn RegistrationSink>) -> Self {
        let catalog = config.catalog();
        let default_payment_method = config.payment_method();
        let state = FormState::new(RegistrationForm::new(default_payment_method), &catalog);
        Self {
            catalog,
            state,
            focus: Control::Name,
            dialog: None,
            default_payment_method,
            sink,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Controls currently shown, in focus order
    pub fn controls(&self) -> Vec<Control> {
        let derived = &self.state.derived;
        let mut controls = vec![Control::Name, Control::Email, Control::JobRole];
        if derived.other_job_role_visible {
            controls.push(Control::OtherJobRole);
        }
        controls.push(Control::ShirtSize);
        controls.push(Control::ShirtDesign);
        if derived.shirt_color_enabled {
            controls.push(Control::ShirtColor);
        }
        controls.extend((0..self.catalog.activities.len()).map(Control::Activity));
        controls.push(Control::PaymentMethod);
        if derived.visible_payment_panel == PaymentMethod::CreditCard {
            controls.extend([
                Control::CardNumber,
                Control::Zip,
                Control::Cvv,
                Control::ExpMonth,
                Control::ExpYear,
            ]);
        }
        controls.push(Control::Register);
        controls
    }

    fn move_focus(&mut self, forward: bool) {
        let controls = self.controls();
        let count = controls.len();
        let current = controls.iter().position(|c| *c == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else if current == 0 {
            count - 1
        } else {
            current - 1
        };
        self.focus = controls[next];
    }

    fn apply(&mut self, event: FormEvent) {
        self.state = self.state.apply(event, &self.catalog);
        if !self.controls().contains(&self.focus) {
            self.focus = Control::Name;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('s') if ctrl || key.modifiers.contains(SUBMIT_MODIFIER) => self.submit(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Left => self.cycle_focused(false),
            KeyCode::Right => self.cycle_focused(true),
            KeyCode::Enter => match self.focus {
                Control::Register => self.submit(),
                Control::Activity(index) => self.toggle_activity(index),
                _ => self.move_focus(true),
            },
            KeyCode::Char(' ') if matches!(self.focus, Control::Activity(_)) => {
                if let Control::Activity(index) = self.focus {
                    self.toggle_activity(index);
                }
            }
            KeyCode::Char(c) if self.focus.is_text_input() && !ctrl => {
                self.edit_text(|field| field.push_char(c));
            }
            KeyCode::Backspace if self.focus.is_text_input() => {
                self.edit_text(FormField::pop_char);
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            return;
        }
        if let Some(Dialog::Accepted { .. }) = self.dialog.take() {
            self.state = FormState::new(
                RegistrationForm::new(self.default_payment_method),
                &self.catalog,
            );
            self.focus = Control::Name;
        }
    }

    /// Edit the focused text field, then validate it as a key-up event
    fn edit_text(&mut self, edit: impl FnOnce(&mut FormField)) {
        let form = &mut self.state.form;
        let field = match self.focus {
            Control::Name => &mut form.name,
            Control::Email => &mut form.email,
            Control::OtherJobRole => &mut form.other_job_role,
            Control::CardNumber => &mut form.cc_number,
            Control::Zip => &mut form.zip,
            Control::Cvv => &mut form.cvv,
            _ => return,
        };
        edit(field);
        if let Some(name) = self.focus.field() {
            self.apply(FormEvent::KeyUp(name));
        }
    }

    fn toggle_activity(&mut self, index: usize) {
        let Some(activity) = self.catalog.activities.get(index) else {
            return;
        };
        let id = activity.id.clone();
        let checked = !self.state.form.is_checked(&id);
        self.apply(FormEvent::ActivityToggled { id, checked });
    }

    /// Step the focused select control to its next or previous option
    fn cycle_focused(&mut self, forward: bool) {
        let form = &self.state.form;
        match self.focus {
            Control::JobRole => {
                let role = cycle(&JobRole::ALL, form.job_role, forward);
                self.apply(FormEvent::JobRoleChanged(role));
            }
            Control::ShirtSize => {
                let size = cycle(&ShirtSize::ALL, Some(form.shirt_size), forward);
                self.state.form.shirt_size = size;
            }
            Control::ShirtDesign => {
                let design = cycle(&ShirtDesign::ALL, form.shirt_design, forward);
                self.apply(FormEvent::ShirtDesignChanged(design));
            }
            Control::ShirtColor => {
                let values: Vec<&str> = self
                    .state
                    .derived
                    .shirt_color_options
                    .iter()
                    .map(|color| color.value.as_str())
                    .collect();
                if values.is_empty() {
                    return;
                }
                let value = cycle(&values, form.shirt_color.as_deref(), forward).to_string();
                self.apply(FormEvent::ShirtColorChanged(value));
            }
            Control::PaymentMethod => {
                let method = cycle(&PaymentMethod::ALL, Some(form.payment_method), forward);
                self.apply(FormEvent::PaymentMethodChanged(method));
            }
            Control::ExpMonth => {
                let months: Vec<u32> = EXPIRATION_MONTHS.collect();
                self.state.form.exp_month = cycle(&months, Some(form.exp_month), forward);
            }
            Control::ExpYear => {
                let years: Vec<u32> = EXPIRATION_YEARS.collect();
                self.state.form.exp_year = cycle(&years, Some(form.exp_year), forward);
            }
            _ => {}
        }
    }

    /// Validate everything and hand the registration to the sink if allowed
    pub fn submit(&mut self) {
        let (next, submission) = self.state.submit();
        self.state = next;

        let Some(registration) = Registration::accepted(&self.state, &submission, Utc::now())
        else {
            let invalid = match submission.decision {
                SubmitDecision::Blocked { invalid } => invalid,
                SubmitDecision::Proceed => Vec::new(),
            };
            tracing::info!(?invalid, "Submission blocked");
            if let Some(first) = invalid.first() {
                self.focus = Control::for_field(*first);
            }
            self.dialog = Some(Dialog::Blocked(invalid));
            return;
        };

        match self.sink.submit(&registration) {
            Ok(()) => {
                tracing::info!(total_cost = registration.total_cost, "Submission accepted");
                self.dialog = Some(Dialog::Accepted {
                    name: registration.name,
                    total_cost: registration.total_cost,
                });
            }
            Err(err) => {
                tracing::warn!("Registration sink failed: {err:#}");
                self.dialog = Some(Dialog::Error(format!("Registration failed: {err}")));
            }
        }
    }
}

/// Option after `current` (or before it, going backwards), wrapping around.
/// With nothing selected yet, starts from either end.
fn cycle<T: Copy + PartialEq>(items: &[T], current: Option<T>, forward: bool) -> T {
    let count = items.len();
    let index = match current.and_then(|value| items.iter().position(|item| *item == value)) {
        Some(i) if forward => (i + 1) % count,
        Some(i) => (i + count - 1) % count,
        None if forward => 0,
        None => count - 1,
    };
    items[index]
}
