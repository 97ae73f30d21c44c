use quiz_core::model::{Identity, IdentityDraft, IdentityError, IdentityErrors};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
}

/// Contact form state: raw inputs plus the errors of the last submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityFormVm {
    draft: IdentityDraft,
    errors: IdentityErrors,
}

impl IdentityFormVm {
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Email => &self.draft.email,
            FormField::Phone => &self.draft.phone,
        }
    }

    /// Store typed input and clear that field's error.
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.draft.name = value,
            FormField::Email => self.draft.email = value,
            FormField::Phone => self.draft.phone = value,
        }
        *self.error_slot(field) = None;
    }

    #[must_use]
    pub fn error(&self, field: FormField) -> Option<IdentityError> {
        match field {
            FormField::Name => self.errors.name,
            FormField::Email => self.errors.email,
            FormField::Phone => self.errors.phone,
        }
    }

    #[must_use]
    pub fn error_message(&self, field: FormField) -> Option<String> {
        self.error(field).map(|err| err.to_string())
    }

    /// Validate the inputs; on failure the per-field errors are kept for display.
    pub fn submit(&mut self) -> Option<Identity> {
        match self.draft.clone().validate() {
            Ok(identity) => {
                self.errors = IdentityErrors::default();
                Some(identity)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Empty every input and error.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn error_slot(&mut self, field: FormField) -> &mut Option<IdentityError> {
        match field {
            FormField::Name => &mut self.errors.name,
            FormField::Email => &mut self.errors.email,
            FormField::Phone => &mut self.errors.phone,
        }
    }
}
