//! Service infrastructure — implements `ServiceController` by invoking the
//! host's service manager through a `CommandRunner`.

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{CommandRunner, ServiceController};
use crate::domain::error::ImgsetError;

/// Restarts services with `<manager> <service> restart`, e.g. `service docker restart`.
pub struct SysvServiceController<R: CommandRunner> {
    runner: R,
    manager: String,
}

impl<R: CommandRunner> SysvServiceController<R> {
    #[must_use]
    pub fn new(runner: R, manager: impl Into<String>) -> Self {
        Self {
            runner,
            manager: manager.into(),
        }
    }
}

impl<R: CommandRunner> ServiceController for SysvServiceController<R> {
    async fn restart(&self, service: &str) -> Result<()> {
        let failed = |detail: String| ImgsetError::ServiceRestart {
            service: service.to_string(),
            detail,
        };
        let output = self
            .runner
            .run(&self.manager, &[service, "restart"])
            .await
            .map_err(|e| failed(format!("{e:#}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("{} exited with {}", self.manager, output.status),
                msg => msg.to_string(),
            };
            return Err(failed(detail).into());
        }
        debug!(service, manager = %self.manager, "service restarted");
        Ok(())
    }
}
