use log::info;

use crate::{
    domain::{
        ports::{SettingsError, SettingsReader, SettingsWriter},
        settings::BoardSettings,
    },
    portal::{RejectedForm, apply_form},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    Invalid(RejectedForm),
    Settings(SettingsError),
}

impl From<SettingsError> for SubmitError {
    fn from(error: SettingsError) -> Self {
        SubmitError::Settings(error)
    }
}

/// Settings editing behind the configuration portal.
pub struct ConfigurationUsecases<S: SettingsReader + SettingsWriter> {
    settings: S,
}

impl<S: SettingsReader + SettingsWriter> ConfigurationUsecases<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    pub fn current(&self) -> BoardSettings {
        self.settings.read_settings()
    }

    /// Validate and store a submitted configuration form.
    pub fn submit_form(&mut self, body: &str) -> Result<BoardSettings, SubmitError> {
        let current = self.settings.read_settings();
        let next = apply_form(&current, body).map_err(SubmitError::Invalid)?;

        self.settings.write_settings(&next)?;
        info!("iotWebConf configuration was updated");
        Ok(next)
    }
}
