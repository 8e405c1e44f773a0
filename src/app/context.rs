use crate::domain::Configuration;
use crate::ports::LocalizationClient;

/// Application context holding the resolved configuration and the API client.
pub struct AppContext<C: LocalizationClient> {
    configuration: Configuration,
    client: C,
}

impl<C: LocalizationClient> AppContext<C> {
    pub fn new(configuration: Configuration, client: C) -> Self {
        Self { configuration, client }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
