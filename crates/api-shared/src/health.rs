use crate::dto::HealthRes;

/// Simple health service used by the REST API.
///
/// Reports whether the process is up and whether a credential was configured; it never calls the
/// remote model API.
pub struct HealthService;

impl HealthService {
    /// Builds the health response.
    ///
    /// # Arguments
    /// * `credential_configured` - Whether an API key was found at startup.
    pub fn check_health(credential_configured: bool) -> HealthRes {
        HealthRes {
            ok: true,
            credential_configured,
            message: if credential_configured {
                "kaigo report assistant is alive".into()
            } else {
                "kaigo report assistant is alive but has no API key".into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_reports_missing_credential() {
        let res = HealthService::check_health(false);
        assert!(res.ok);
        assert!(!res.credential_configured);
        assert!(res.message.contains("no API key"));
    }
}
