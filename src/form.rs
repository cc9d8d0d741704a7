//! The order form container.
//!
//! [`OrderForm`] is the single owner of everything the ticket mutates:
//! the layered value store, the validation state, the edit mode and
//! submission status, the staged external intent, and the notification
//! queue. All writes go through its entry points so readers always
//! observe a consistent snapshot per logical update.

use std::collections::VecDeque;

use tracing::debug;

use crate::intent::MappedIntent;
use crate::schema;
use crate::store::{DerivedOrder, FieldKey, FieldValue, LayeredStore, OrderPatch};
use crate::validation::ValidationState;

/// Form lifecycle mode.
///
/// `Creating` keeps every schema field writable; `Viewing` locks the
/// form after submission; `Amending` re-opens only the order type's
/// declared editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Viewing,
    Amending,
}

/// Whether a submission round trip is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
}

/// Toast-style user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A queued user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// What happened to an external intent on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentDisposition {
    /// The form was clean; the intent layer was replaced immediately.
    Applied,
    /// The form was dirty; the intent is staged pending confirmation.
    Staged,
}

/// Central state container for one order ticket.
#[derive(Debug)]
pub struct OrderForm {
    pub store: LayeredStore,
    pub validation: ValidationState,
    pub edit_mode: EditMode,
    pub submit_status: SubmitStatus,
    pub current_order_id: Option<String>,
    pub pending_intent: Option<MappedIntent>,
    pub notifications: VecDeque<Notification>,
}

impl OrderForm {
    /// Creates a fresh form in creating mode over the given defaults.
    #[must_use]
    pub fn new(defaults: OrderPatch) -> Self {
        Self {
            store: LayeredStore::new(defaults),
            validation: ValidationState::default(),
            edit_mode: EditMode::Creating,
            submit_status: SubmitStatus::Idle,
            current_order_id: None,
            pending_intent: None,
            notifications: VecDeque::new(),
        }
    }

    /// The single effective order derived from all layers.
    #[must_use]
    pub fn derived_values(&self) -> DerivedOrder {
        self.store.derived()
    }

    /// Whether the user-edit layer is non-empty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Writes a field into the user-edit layer and clears any stale
    /// sync/async error entries for it, so old messages vanish on edit
    /// and re-validation repopulates them. Writes to fields that the
    /// current mode keeps read-only are ignored.
    pub fn set_field_value(&mut self, key: FieldKey, value: FieldValue) {
        if !self.is_writable(key) {
            debug!(field = key.as_str(), mode = ?self.edit_mode, "Ignoring write to read-only field");
            return;
        }
        self.store.set_field(key, value);
        self.validation.clear_field_messages(key);
    }

    fn is_writable(&self, key: FieldKey) -> bool {
        // Render-only keys are never stored
        if matches!(
            key,
            FieldKey::Status | FieldKey::ExpiryEndTime | FieldKey::ExpiryEndTimeZone
        ) {
            return false;
        }
        match self.edit_mode {
            EditMode::Viewing => false,
            EditMode::Amending => match self.derived_values().order_type() {
                Some(order_type) => schema::config_for(order_type).editable_fields.contains(&key),
                None => false,
            },
            EditMode::Creating => match self.derived_values().order_type() {
                // The type selector itself must stay writable
                Some(order_type) => {
                    key == FieldKey::OrderType
                        || schema::config_for(order_type).fields.contains(&key)
                }
                None => true,
            },
        }
    }

    /// Clears the user-edit layer and all validation state in one step.
    pub fn reset_form_interactions(&mut self) {
        self.store.clear_edits();
        self.validation = ValidationState::default();
    }

    /// Applies the session preference patch (default account and the
    /// like) into the preference layer.
    pub fn apply_preferences(&mut self, preferences: OrderPatch) {
        self.store.set_preferences(preferences);
    }

    /// Applies an external intent, or stages it when the form is dirty
    /// so unsaved edits are never silently discarded.
    pub fn apply_external_intent(&mut self, intent: MappedIntent) -> IntentDisposition {
        if self.is_dirty() {
            debug!("Form dirty; staging external intent for confirmation");
            self.pending_intent = Some(intent);
            return IntentDisposition::Staged;
        }
        self.apply_intent_now(intent);
        IntentDisposition::Applied
    }

    /// Accepts the staged intent: the intent layer is replaced wholesale
    /// and the edits it conflicted with are dropped along with their
    /// validation state.
    pub fn confirm_pending_intent(&mut self) {
        if let Some(intent) = self.pending_intent.take() {
            self.store.clear_edits();
            self.validation = ValidationState::default();
            self.apply_intent_now(intent);
        }
    }

    /// Drops the staged intent, keeping the user's edits.
    pub fn discard_pending_intent(&mut self) {
        self.pending_intent = None;
    }

    fn apply_intent_now(&mut self, intent: MappedIntent) {
        self.store.set_intent(intent.patch);
        if intent.order_id.is_some() {
            self.current_order_id = intent.order_id;
        }
    }

    /// Queues a success toast.
    pub fn notify_success(&mut self, message: String) {
        self.notifications.push_back(Notification {
            kind: NotificationKind::Success,
            message,
        });
    }

    /// Queues an error toast.
    pub fn notify_error(&mut self, message: String) {
        self.notifications.push_back(Notification {
            kind: NotificationKind::Error,
            message,
        });
    }
}
