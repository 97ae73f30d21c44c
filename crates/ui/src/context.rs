use services::AppServices;

/// Shared services, provided by the composition root (`crates/app`).
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.services.settings().seconds_per_question()
    }
}
