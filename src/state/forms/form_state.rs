//! Derived form state: visibility, totals, conflicts and validity
//!
//! Every operation here is a pure function of its inputs. The previous
//! derived values that toggles depend on (running total, checked set) are
//! passed in and handed back rather than kept anywhere else.

use super::registration::{PaymentMethod, RegistrationForm};
use crate::state::catalog::{Activity, Catalog, JobRole, ShirtColor, ShirtDesign};
use crate::state::validation::{
    validate_activities, validate_credit, validate_cvv, validate_email, validate_name,
    validate_zip, FieldName, Validity,
};
use std::collections::{BTreeMap, BTreeSet};

/// Values computed from the raw form that drive presentation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedState {
    pub other_job_role_visible: bool,
    pub shirt_color_enabled: bool,
    pub shirt_color_options: Vec<ShirtColor>,
    pub total_cost: u32,
    /// Activity id -> disabled by a checked activity in the same time slot
    pub activity_disabled: BTreeMap<String, bool>,
    pub visible_payment_panel: PaymentMethod,
    /// Fields that have been validated so far; absent means no hint shown
    pub field_validity: BTreeMap<FieldName, Validity>,
    pub submission_blocked: bool,
}

impl DerivedState {
    pub fn is_disabled(&self, activity_id: &str) -> bool {
        self.activity_disabled
            .get(activity_id)
            .copied()
            .unwrap_or(false)
    }

    /// Hint message currently shown for `field`
    pub fn message(&self, field: FieldName) -> Option<&'static str> {
        self.field_validity
            .get(&field)
            .and_then(|validity| validity.message(field))
    }

    pub fn is_invalid(&self, field: FieldName) -> bool {
        self.field_validity
            .get(&field)
            .is_some_and(|validity| !validity.is_valid())
    }
}

/// Result of picking a shirt design
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShirtColorUpdate {
    pub enabled: bool,
    pub options: Vec<ShirtColor>,
    /// First matching color value; `None` when the design has no colors
    pub selected: Option<String>,
}

/// Result of checking or unchecking an activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityUpdate {
    pub selected: BTreeSet<String>,
    pub total_cost: u32,
    pub conflicts: BTreeMap<String, bool>,
}

/// Inputs a validator needs beyond the field's own value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub payment_method: PaymentMethod,
    pub total_cost: u32,
}

impl ValidationContext {
    /// Card fields only count when paying by card
    pub fn is_applicable(&self, field: FieldName) -> bool {
        !field.is_credit_card_field() || self.payment_method == PaymentMethod::CreditCard
    }
}

/// What triggered a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationEvent {
    KeyUp(FieldName),
    Change(FieldName),
    Submit,
}

/// Whether a submission may go ahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    Blocked { invalid: Vec<FieldName> },
}

/// Every applicable field's validity plus the resulting decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub validity: BTreeMap<FieldName, Validity>,
    pub decision: SubmitDecision,
}

impl Submission {
    pub fn should_proceed(&self) -> bool {
        matches!(self.decision, SubmitDecision::Proceed)
    }
}

/// Input events the form reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    JobRoleChanged(JobRole),
    ShirtDesignChanged(ShirtDesign),
    ShirtColorChanged(String),
    ActivityToggled { id: String, checked: bool },
    PaymentMethodChanged(PaymentMethod),
    /// A text field's value was edited
    KeyUp(FieldName),
}

pub fn on_job_role_change(role: JobRole) -> bool {
    role == JobRole::Other
}

pub fn on_shirt_design_change(design: ShirtDesign, colors: &[ShirtColor]) -> ShirtColorUpdate {
    let options: Vec<ShirtColor> = colors
        .iter()
        .filter(|color| color.theme == design)
        .cloned()
        .collect();
    let selected = options.first().map(|color| color.value.clone());
    ShirtColorUpdate {
        enabled: true,
        options,
        selected,
    }
}

/// Disabled flag for every activity given the checked set
pub fn activity_conflicts(
    activities: &[Activity],
    selected: &BTreeSet<String>,
) -> BTreeMap<String, bool> {
    activities
        .iter()
        .map(|activity| {
            let disabled = activities
                .iter()
                .filter(|other| selected.contains(&other.id))
                .any(|other| activity.conflicts_with(other));
            (activity.id.clone(), disabled)
        })
        .collect()
}

/// Apply one checkbox transition to the checked set and running total.
///
/// Repeating the current state (checking a checked activity) changes nothing.
pub fn on_activity_toggle(
    activities: &[Activity],
    activity: &Activity,
    checked: bool,
    selected: &BTreeSet<String>,
    total_cost: u32,
) -> ActivityUpdate {
    let mut selected = selected.clone();
    let total_cost = if checked {
        if selected.insert(activity.id.clone()) {
            total_cost.saturating_add(activity.cost)
        } else {
            total_cost
        }
    } else if selected.remove(&activity.id) {
        total_cost.saturating_sub(activity.cost)
    } else {
        total_cost
    };

    let conflicts = activity_conflicts(activities, &selected);
    ActivityUpdate {
        selected,
        total_cost,
        conflicts,
    }
}

pub fn on_payment_method_change(method: PaymentMethod) -> PaymentMethod {
    method
}

/// Raw value of a text field; activities have no text value
pub fn field_value(form: &RegistrationForm, field: FieldName) -> &str {
    match field {
        FieldName::Name => form.name.as_text(),
        FieldName::Email => form.email.as_text(),
        FieldName::Activities => "",
        FieldName::CreditCardNumber => form.cc_number.as_text(),
        FieldName::Zip => form.zip.as_text(),
        FieldName::Cvv => form.cvv.as_text(),
    }
}

pub fn validate_field(field: FieldName, value: &str, context: &ValidationContext) -> Validity {
    if !context.is_applicable(field) {
        return Validity::Valid;
    }
    match field {
        FieldName::Name => validate_name(value),
        FieldName::Email => validate_email(value),
        FieldName::Activities => validate_activities(context.total_cost),
        FieldName::CreditCardNumber => validate_credit(value),
        FieldName::Zip => validate_zip(value),
        FieldName::Cvv => validate_cvv(value),
    }
}

/// Validate the fields an event touches. Inapplicable fields are left out.
pub fn validate_on(
    event: ValidationEvent,
    form: &RegistrationForm,
    context: &ValidationContext,
) -> BTreeMap<FieldName, Validity> {
    let fields: Vec<FieldName> = match event {
        ValidationEvent::KeyUp(field) | ValidationEvent::Change(field) => vec![field],
        ValidationEvent::Submit => FieldName::ALL.to_vec(),
    };
    fields
        .into_iter()
        .filter(|field| context.is_applicable(*field))
        .map(|field| {
            let validity = validate_field(field, field_value(form, field), context);
            (field, validity)
        })
        .collect()
}

pub fn validate_all(form: &RegistrationForm, context: &ValidationContext) -> Submission {
    let validity = validate_on(ValidationEvent::Submit, form, context);
    let invalid: Vec<FieldName> = validity
        .iter()
        .filter(|(_, v)| !v.is_valid())
        .map(|(field, _)| *field)
        .collect();
    let decision = if invalid.is_empty() {
        SubmitDecision::Proceed
    } else {
        SubmitDecision::Blocked { invalid }
    };
    Submission { validity, decision }
}

/// Rebuild every derived value from the raw form
pub fn derive(form: &RegistrationForm, catalog: &Catalog) -> DerivedState {
    let (shirt_color_enabled, shirt_color_options) = match form.shirt_design {
        Some(design) => {
            let update = on_shirt_design_change(design, &catalog.colors);
            (update.enabled, update.options)
        }
        None => (false, Vec::new()),
    };
    let total_cost = catalog
        .activities
        .iter()
        .filter(|activity| form.is_checked(&activity.id))
        .fold(0u32, |total, activity| total.saturating_add(activity.cost));

    DerivedState {
        other_job_role_visible: form.job_role.is_some_and(on_job_role_change),
        shirt_color_enabled,
        shirt_color_options,
        total_cost,
        activity_disabled: activity_conflicts(&catalog.activities, &form.selected_activities),
        visible_payment_panel: on_payment_method_change(form.payment_method),
        field_validity: BTreeMap::new(),
        submission_blocked: false,
    }
}

/// The single form instance and its derived state
#[derive(Debug, Clone)]
pub struct FormState {
    pub form: RegistrationForm,
    pub derived: DerivedState,
}

impl FormState {
    pub fn new(form: RegistrationForm, catalog: &Catalog) -> Self {
        let derived = derive(&form, catalog);
        Self { form, derived }
    }

    pub fn context(&self) -> ValidationContext {
        ValidationContext {
            payment_method: self.form.payment_method,
            total_cost: self.derived.total_cost,
        }
    }

    /// Next state after `event`
    pub fn apply(&self, event: FormEvent, catalog: &Catalog) -> Self {
        let mut next = self.clone();
        match event {
            FormEvent::JobRoleChanged(role) => {
                next.form.job_role = Some(role);
                next.derived.other_job_role_visible = on_job_role_change(role);
                if !next.derived.other_job_role_visible {
                    next.form.other_job_role.clear();
                }
            }
            FormEvent::ShirtDesignChanged(design) => {
                let update = on_shirt_design_change(design, &catalog.colors);
                next.form.shirt_design = Some(design);
                next.form.shirt_color = update.selected;
                next.derived.shirt_color_enabled = update.enabled;
                next.derived.shirt_color_options = update.options;
            }
            FormEvent::ShirtColorChanged(value) => {
                let offered = next
                    .derived
                    .shirt_color_options
                    .iter()
                    .any(|color| color.value == value);
                if offered {
                    next.form.shirt_color = Some(value);
                }
            }
            FormEvent::ActivityToggled { id, checked } => {
                let Some(activity) = catalog.activity(&id) else {
                    tracing::debug!("Ignoring toggle of unknown activity {id}");
                    return next;
                };
                if checked && self.derived.is_disabled(&id) {
                    tracing::debug!("Refusing to check {id}: time slot already taken");
                    return next;
                }
                let update = on_activity_toggle(
                    &catalog.activities,
                    activity,
                    checked,
                    &self.form.selected_activities,
                    self.derived.total_cost,
                );
                next.form.selected_activities = update.selected;
                next.derived.total_cost = update.total_cost;
                next.derived.activity_disabled = update.conflicts;
                next.revalidate(ValidationEvent::Change(FieldName::Activities));
            }
            FormEvent::PaymentMethodChanged(method) => {
                next.form.payment_method = method;
                next.derived.visible_payment_panel = on_payment_method_change(method);
                let context = next.context();
                next.derived
                    .field_validity
                    .retain(|field, _| context.is_applicable(*field));
            }
            FormEvent::KeyUp(field) => next.revalidate(ValidationEvent::KeyUp(field)),
        }
        next
    }

    /// Validate everything for a submit attempt
    pub fn submit(&self) -> (Self, Submission) {
        let mut next = self.clone();
        let submission = validate_all(&self.form, &self.context());
        next.derived.field_validity = submission.validity.clone();
        next.derived.submission_blocked = !submission.should_proceed();
        (next, submission)
    }

    fn revalidate(&mut self, event: ValidationEvent) {
        let results = validate_on(event, &self.form, &self.context());
        self.derived.field_validity.extend(results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::default_colors;
    use crate::state::validation::InvalidReason;

    fn catalog() -> Catalog {
        Catalog::default()
    }

    fn toggle(state: &FormState, id: &str, checked: bool) -> FormState {
        state.apply(
            FormEvent::ActivityToggled {
                id: id.to_string(),
                checked,
            },
            &catalog(),
        )
    }

    fn valid_card_form() -> FormState {
        let catalog = catalog();
        let mut state = FormState::new(RegistrationForm::default(), &catalog);
        state.form.name.set_text("John Smith");
        state.form.email.set_text("john@example.com");
        state.form.cc_number.set_text("1234567890123456");
        state.form.zip.set_text("12345");
        state.form.cvv.set_text("123");
        toggle(&state, "all", true)
    }

    mod initial_state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_form_starts_with_card_panel_and_no_hints() {
            let state = FormState::new(RegistrationForm::default(), &catalog());
            assert!(!state.derived.other_job_role_visible);
            assert!(!state.derived.shirt_color_enabled);
            assert!(state.derived.shirt_color_options.is_empty());
            assert_eq!(state.derived.total_cost, 0);
            assert_eq!(
                state.derived.visible_payment_panel,
                PaymentMethod::CreditCard
            );
            assert!(state.derived.field_validity.is_empty());
            assert!(!state.derived.submission_blocked);
            assert!(state.derived.activity_disabled.values().all(|d| !d));
        }

        #[test]
        fn test_derive_counts_preselected_activities() {
            let mut form = RegistrationForm::default();
            form.selected_activities.insert("all".to_string());
            form.selected_activities.insert("express".to_string());
            let derived = derive(&form, &catalog());
            assert_eq!(derived.total_cost, 300);
            assert!(derived.is_disabled("js-frameworks"));
            assert!(!derived.is_disabled("express"));
        }
    }

    mod job_role {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_only_other_shows_text_field() {
            assert!(on_job_role_change(JobRole::Other));
            for role in JobRole::ALL.into_iter().filter(|r| *r != JobRole::Other) {
                assert!(!on_job_role_change(role));
            }
        }

        #[test]
        fn test_leaving_other_clears_text() {
            let catalog = catalog();
            let state = FormState::new(RegistrationForm::default(), &catalog)
                .apply(FormEvent::JobRoleChanged(JobRole::Other), &catalog);
            assert!(state.derived.other_job_role_visible);

            let mut state = state;
            state.form.other_job_role.set_text("Astronaut");
            let state = state.apply(FormEvent::JobRoleChanged(JobRole::Student), &catalog);
            assert!(!state.derived.other_job_role_visible);
            assert_eq!(state.form.other_job_role.as_text(), "");
        }
    }

    mod shirt {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_design_filters_colors_in_catalog_order() {
            let update = on_shirt_design_change(ShirtDesign::HeartJs, &default_colors());
            let values: Vec<&str> = update.options.iter().map(|c| c.value.as_str()).collect();
            assert_eq!(values, vec!["tomato", "steelblue", "dimgrey"]);
            assert_eq!(update.selected.as_deref(), Some("tomato"));
            assert!(update.enabled);
        }

        #[test]
        fn test_design_change_resets_color() {
            let catalog = catalog();
            let state = FormState::new(RegistrationForm::default(), &catalog)
                .apply(FormEvent::ShirtDesignChanged(ShirtDesign::JsPuns), &catalog)
                .apply(FormEvent::ShirtColorChanged("gold".to_string()), &catalog);
            assert_eq!(state.form.shirt_color.as_deref(), Some("gold"));

            let state = state.apply(FormEvent::ShirtDesignChanged(ShirtDesign::HeartJs), &catalog);
            assert_eq!(state.form.shirt_color.as_deref(), Some("tomato"));
            assert!(state.derived.shirt_color_enabled);

            let state = state.apply(FormEvent::ShirtDesignChanged(ShirtDesign::JsPuns), &catalog);
            assert_eq!(state.form.shirt_color.as_deref(), Some("cornflowerblue"));
        }

        #[test]
        fn test_design_without_colors_stays_enabled_and_empty() {
            let update = on_shirt_design_change(ShirtDesign::JsPuns, &[]);
            assert!(update.enabled);
            assert!(update.options.is_empty());
            assert!(update.selected.is_none());
        }

        #[test]
        fn test_color_from_other_theme_is_ignored() {
            let catalog = catalog();
            let state = FormState::new(RegistrationForm::default(), &catalog)
                .apply(FormEvent::ShirtDesignChanged(ShirtDesign::JsPuns), &catalog)
                .apply(FormEvent::ShirtColorChanged("tomato".to_string()), &catalog);
            assert_eq!(state.form.shirt_color.as_deref(), Some("cornflowerblue"));
        }
    }

    mod activities {
        use super::*;
        use pretty_assertions::assert_eq;

        fn slot_catalog() -> Vec<Activity> {
            vec![
                Activity::new("a", "A", 100, Some("tue-am")),
                Activity::new("b", "B", 50, Some("tue-am")),
                Activity::new("c", "C", 25, Some("tue-am")),
                Activity::new("d", "D", 10, None),
            ]
        }

        #[test]
        fn test_total_saturates_instead_of_wrapping() {
            let activities = vec![
                Activity::new("gala", "Gala", u32::MAX, None),
                Activity::new("npm", "npm", 1, None),
            ];
            let empty = BTreeSet::new();
            let gala = on_activity_toggle(&activities, &activities[0], true, &empty, 0);
            let both = on_activity_toggle(
                &activities,
                &activities[1],
                true,
                &gala.selected,
                gala.total_cost,
            );
            assert_eq!(both.total_cost, u32::MAX);

            let catalog = Catalog {
                activities,
                colors: Vec::new(),
            };
            let mut form = RegistrationForm::default();
            form.selected_activities = both.selected;
            assert_eq!(derive(&form, &catalog).total_cost, u32::MAX);
        }

        #[test]
        fn test_checking_disables_same_slot_and_unchecking_restores() {
            let activities = slot_catalog();
            let empty = BTreeSet::new();
            let checked = on_activity_toggle(&activities, &activities[0], true, &empty, 0);
            assert_eq!(checked.total_cost, 100);
            assert_eq!(checked.conflicts["b"], true);
            assert_eq!(checked.conflicts["c"], true);
            assert_eq!(checked.conflicts["a"], false);
            assert_eq!(checked.conflicts["d"], false);

            let unchecked = on_activity_toggle(
                &activities,
                &activities[0],
                false,
                &checked.selected,
                checked.total_cost,
            );
            assert_eq!(unchecked.total_cost, 0);
            assert!(unchecked.conflicts.values().all(|d| !d));
        }

        #[test]
        fn test_other_checked_conflict_keeps_activity_disabled() {
            let activities = slot_catalog();
            let after_a = on_activity_toggle(&activities, &activities[0], true, &BTreeSet::new(), 0);
            let after_c = on_activity_toggle(
                &activities,
                &activities[2],
                true,
                &after_a.selected,
                after_a.total_cost,
            );
            let after_uncheck_a = on_activity_toggle(
                &activities,
                &activities[0],
                false,
                &after_c.selected,
                after_c.total_cost,
            );
            assert_eq!(after_uncheck_a.conflicts["b"], true);
            assert_eq!(after_uncheck_a.conflicts["a"], true);
            assert_eq!(after_uncheck_a.conflicts["c"], false);
            assert_eq!(after_uncheck_a.total_cost, 25);
        }

        #[test]
        fn test_repeated_transition_is_noop() {
            let activities = slot_catalog();
            let once = on_activity_toggle(&activities, &activities[3], true, &BTreeSet::new(), 0);
            let twice = on_activity_toggle(
                &activities,
                &activities[3],
                true,
                &once.selected,
                once.total_cost,
            );
            assert_eq!(once, twice);

            let off = on_activity_toggle(&activities, &activities[3], false, &BTreeSet::new(), 0);
            assert_eq!(off.total_cost, 0);
        }

        #[test]
        fn test_check_then_uncheck_restores_state() {
            let catalog = catalog();
            let start = toggle(
                &FormState::new(RegistrationForm::default(), &catalog),
                "js-libs",
                true,
            );
            for activity in &catalog.activities {
                if start.form.is_checked(&activity.id) || start.derived.is_disabled(&activity.id) {
                    continue;
                }
                let round_trip = toggle(&toggle(&start, &activity.id, true), &activity.id, false);
                assert_eq!(round_trip.derived.total_cost, start.derived.total_cost);
                assert_eq!(
                    round_trip.derived.activity_disabled,
                    start.derived.activity_disabled
                );
                assert_eq!(
                    round_trip.form.selected_activities,
                    start.form.selected_activities
                );
            }
        }

        #[test]
        fn test_total_matches_checked_sum_over_toggle_sequences() {
            let catalog = catalog();
            let ids: Vec<String> = catalog.activities.iter().map(|a| a.id.clone()).collect();
            let mut seed: u32 = 7;
            let mut state = FormState::new(RegistrationForm::default(), &catalog);

            for _ in 0..500 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let id = &ids[(seed >> 8) as usize % ids.len()];
                let checked = (seed >> 20) % 2 == 0;
                state = toggle(&state, id, checked);

                let expected: u32 = catalog
                    .activities
                    .iter()
                    .filter(|a| state.form.is_checked(&a.id))
                    .map(|a| a.cost)
                    .sum();
                assert_eq!(state.derived.total_cost, expected);
                assert_eq!(
                    state.derived.activity_disabled,
                    derive(&state.form, &catalog).activity_disabled
                );
            }
        }

        #[test]
        fn test_form_refuses_checking_disabled_activity() {
            let state = toggle(
                &FormState::new(RegistrationForm::default(), &catalog()),
                "js-frameworks",
                true,
            );
            assert!(state.derived.is_disabled("express"));

            let state = toggle(&state, "express", true);
            assert!(!state.form.is_checked("express"));
            assert_eq!(state.derived.total_cost, 100);
        }

        #[test]
        fn test_toggle_revalidates_activities() {
            let on = toggle(
                &FormState::new(RegistrationForm::default(), &catalog()),
                "npm",
                true,
            );
            assert_eq!(
                on.derived.field_validity.get(&FieldName::Activities),
                Some(&Validity::Valid)
            );
            let off = toggle(&on, "npm", false);
            assert!(off.derived.is_invalid(FieldName::Activities));
            assert_eq!(
                off.derived.message(FieldName::Activities),
                Some("Choose at least one activity")
            );
        }

        #[test]
        fn test_unknown_activity_is_ignored() {
            let start = FormState::new(RegistrationForm::default(), &catalog());
            let next = toggle(&start, "karaoke", true);
            assert_eq!(next.derived, start.derived);
        }
    }

    mod payment {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_exactly_one_panel_follows_method() {
            let catalog = catalog();
            let mut state = FormState::new(RegistrationForm::default(), &catalog);
            for method in PaymentMethod::ALL {
                state = state.apply(FormEvent::PaymentMethodChanged(method), &catalog);
                assert_eq!(state.derived.visible_payment_panel, method);
            }
        }

        #[test]
        fn test_card_fields_skipped_for_other_methods() {
            let context = ValidationContext {
                payment_method: PaymentMethod::PayPal,
                total_cost: 0,
            };
            assert_eq!(
                validate_field(FieldName::CreditCardNumber, "", &context),
                Validity::Valid
            );
            assert_eq!(validate_field(FieldName::Zip, "x", &context), Validity::Valid);
            assert_eq!(validate_field(FieldName::Cvv, "", &context), Validity::Valid);
        }

        #[test]
        fn test_leaving_card_clears_card_hints() {
            let catalog = catalog();
            let (state, _) = FormState::new(RegistrationForm::default(), &catalog).submit();
            assert!(state.derived.is_invalid(FieldName::Zip));

            let state = state.apply(FormEvent::PaymentMethodChanged(PaymentMethod::Bitcoin), &catalog);
            assert!(state.derived.message(FieldName::Zip).is_none());
            assert!(state.derived.message(FieldName::CreditCardNumber).is_none());
            assert!(state.derived.is_invalid(FieldName::Name));
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_keyup_validates_only_that_field() {
            let catalog = catalog();
            let mut state = FormState::new(RegistrationForm::default(), &catalog);
            state.form.email.set_text("a@b");
            let state = state.apply(FormEvent::KeyUp(FieldName::Email), &catalog);
            assert_eq!(
                state.derived.field_validity,
                BTreeMap::from([(
                    FieldName::Email,
                    Validity::Invalid(InvalidReason::BadFormat)
                )])
            );
        }

        #[test]
        fn test_keyup_on_card_field_ignored_when_not_paying_by_card() {
            let catalog = catalog();
            let state = FormState::new(RegistrationForm::new(PaymentMethod::PayPal), &catalog)
                .apply(FormEvent::KeyUp(FieldName::Zip), &catalog);
            assert!(state.derived.field_validity.is_empty());
        }

        #[test]
        fn test_valid_card_registration_proceeds() {
            let (state, submission) = valid_card_form().submit();
            assert!(submission.should_proceed());
            assert_eq!(submission.decision, SubmitDecision::Proceed);
            assert_eq!(submission.validity.len(), FieldName::ALL.len());
            assert!(submission.validity.values().all(Validity::is_valid));
            assert!(!state.derived.submission_blocked);
        }

        #[test]
        fn test_single_invalid_field_blocks_and_leaves_others_valid() {
            let cases = [
                (FieldName::Name, "John"),
                (FieldName::Email, "john@example"),
                (FieldName::CreditCardNumber, "123"),
                (FieldName::Zip, "1234"),
                (FieldName::Cvv, ""),
            ];
            for (broken, value) in cases {
                let mut state = valid_card_form();
                match broken {
                    FieldName::Name => state.form.name.set_text(value),
                    FieldName::Email => state.form.email.set_text(value),
                    FieldName::CreditCardNumber => state.form.cc_number.set_text(value),
                    FieldName::Zip => state.form.zip.set_text(value),
                    FieldName::Cvv => state.form.cvv.set_text(value),
                    FieldName::Activities => unreachable!(),
                }
                let (next, submission) = state.submit();
                assert_eq!(
                    submission.decision,
                    SubmitDecision::Blocked {
                        invalid: vec![broken]
                    }
                );
                assert!(next.derived.submission_blocked);
                for field in FieldName::ALL.into_iter().filter(|f| *f != broken) {
                    assert_eq!(submission.validity[&field], Validity::Valid);
                }
            }
        }

        #[test]
        fn test_no_activities_blocks() {
            let state = toggle(&valid_card_form(), "all", false);
            let (_, submission) = state.submit();
            assert_eq!(
                submission.decision,
                SubmitDecision::Blocked {
                    invalid: vec![FieldName::Activities]
                }
            );
        }

        #[test]
        fn test_paypal_submission_skips_card_fields() {
            let catalog = catalog();
            let mut state = valid_card_form()
                .apply(FormEvent::PaymentMethodChanged(PaymentMethod::PayPal), &catalog);
            state.form.cc_number.clear();
            let (_, submission) = state.submit();
            assert!(submission.should_proceed());
            assert!(!submission.validity.contains_key(&FieldName::CreditCardNumber));
            assert!(!submission.validity.contains_key(&FieldName::Zip));
            assert!(!submission.validity.contains_key(&FieldName::Cvv));
        }

        #[test]
        fn test_empty_form_reports_blank_messages() {
            let (state, submission) =
                FormState::new(RegistrationForm::default(), &catalog()).submit();
            assert!(!submission.should_proceed());
            assert_eq!(
                state.derived.message(FieldName::Name),
                Some("Name field cannot be blank")
            );
            assert_eq!(
                state.derived.message(FieldName::Email),
                Some("Email field cannot be blank")
            );
        }
    }
}
