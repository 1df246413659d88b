//! One-shot deployment status.

use bookverse_shop::{HealthIndicator, StatusSource};

/// Print the deployment banner and the health line.
///
/// Failures are shown in place of the line they affect rather than
/// aborting, so a down health endpoint still shows the banner.
#[allow(clippy::print_stdout)]
pub async fn show<S: StatusSource>(source: &S) {
    let (version, health) = tokio::join!(source.version(), source.health());

    match version {
        Ok(info) => println!("{}", info.banner()),
        Err(e) => {
            tracing::warn!("Error fetching deployment info: {e}");
            println!("🚀 Deployment: unavailable");
        }
    }

    let indicator = match health {
        Ok(status) => HealthIndicator::Healthy(status),
        Err(e) => {
            tracing::warn!("Error fetching health status: {e}");
            HealthIndicator::Unavailable
        }
    };
    println!("{indicator}");
}
