//! Oracle logon strings.

use bench_core::{ConnectionSettings, ConnectionTarget, SetupError};

/// Credentials plus the connect descriptor used by both utilities.
#[derive(Clone)]
pub struct Logon {
    user: String,
    password: String,
    descriptor: String,
}

impl Logon {
    /// Resolve the descriptor: `//host/service` or the full connection string.
    pub fn from_settings(settings: &ConnectionSettings) -> Result<Self, SetupError> {
        let descriptor = match settings.target()? {
            ConnectionTarget::ConnectionString(cs) => cs.to_string(),
            ConnectionTarget::HostDatabase { host, database } => format!("//{host}/{database}"),
        };
        Ok(Self {
            user: settings.user.clone(),
            password: settings.password.clone(),
            descriptor,
        })
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// `user/password@descriptor`, as SQL*Loader expects it.
    pub fn userid(&self) -> String {
        format!("{}/{}@{}", self.user, self.password, self.descriptor)
    }

    /// `user/***@descriptor`, for logs and error messages.
    pub fn masked(&self) -> String {
        format!("{}/***@{}", self.user, self.descriptor)
    }

    /// SQL*Plus `CONNECT` command.
    pub fn connect_command(&self) -> String {
        format!(
            "CONNECT {}/\"{}\"@\"{}\"",
            self.user, self.password, self.descriptor
        )
    }
}

impl std::fmt::Debug for Logon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}
