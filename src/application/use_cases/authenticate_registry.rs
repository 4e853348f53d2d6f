use crate::ports::outbound::{ProgressReporter, RegistryAuthenticator};
use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// AuthenticateRegistryUseCase - Logs the container engine into the study registry
///
/// Mirror and scan stages run this first; a failure stops them.
pub struct AuthenticateRegistryUseCase<RA, PR> {
    authenticator: RA,
    progress_reporter: PR,
}

impl<RA, PR> AuthenticateRegistryUseCase<RA, PR>
where
    RA: RegistryAuthenticator,
    PR: ProgressReporter,
{
    pub fn new(authenticator: RA, progress_reporter: PR) -> Self {
        Self {
            authenticator,
            progress_reporter,
        }
    }

    pub fn execute(&self, registry: &RegistryConfig) -> Result<()> {
        self.progress_reporter.report(&format!(
            "🔐 Authenticating against {}...",
            registry.login_server()
        ));
        self.authenticator.authenticate(registry)?;
        self.progress_reporter
            .report(&format!("✅ Logged in to {}", registry.name()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::PipelineError;
    use std::cell::Cell;

    struct FakeAuthenticator {
        accept: bool,
        calls: Cell<usize>,
    }

    impl RegistryAuthenticator for FakeAuthenticator {
        fn authenticate(&self, registry: &RegistryConfig) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.accept {
                Ok(())
            } else {
                anyhow::bail!(PipelineError::AuthenticationFailed {
                    registry: registry.name().to_string(),
                    details: "token expired".to_string(),
                })
            }
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn registry() -> RegistryConfig {
        RegistryConfig::new("studyacr".to_string(), "studyacr.azurecr.io".to_string()).unwrap()
    }

    #[test]
    fn test_authenticate_once() {
        let use_case = AuthenticateRegistryUseCase::new(
            FakeAuthenticator {
                accept: true,
                calls: Cell::new(0),
            },
            SilentReporter,
        );
        use_case.execute(&registry()).unwrap();
        assert_eq!(use_case.authenticator.calls.get(), 1);
    }

    #[test]
    fn test_authentication_failure_propagates() {
        let use_case = AuthenticateRegistryUseCase::new(
            FakeAuthenticator {
                accept: false,
                calls: Cell::new(0),
            },
            SilentReporter,
        );
        let err = use_case.execute(&registry()).unwrap_err();
        assert!(err.to_string().contains("Registry authentication failed: studyacr"));
    }
}
