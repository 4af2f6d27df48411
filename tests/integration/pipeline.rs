//! The update pipeline over real HTTP.

use crate::common::{config_for, exe_name, game_zip, publish, read_record};
use alaunch_cli::installation::{InstallationState, Status};
use alaunch_cli::remote::HttpSource;
use alaunch_cli::test_utils::{TestServer, init_test_logging};
use alaunch_cli::updater::{CheckOutcome, UpdatePipeline};
use alaunch_cli::version::Version;
use anyhow::Result;
use tempfile::TempDir;

fn pipeline_for(server: &TestServer, temp: &TempDir) -> Result<UpdatePipeline<HttpSource>> {
    init_test_logging(None);
    let config = config_for(server, temp.path());
    Ok(UpdatePipeline::new(InstallationState::from_config(&config), HttpSource::from_config(&config)?))
}

#[tokio::test]
async fn test_install_then_update_over_http() -> Result<()> {
    let server = TestServer::start().await;
    let temp = TempDir::new()?;
    publish(&server, "1.0.0\n", game_zip("build one"));
    let pipeline = pipeline_for(&server, &temp)?;

    assert_eq!(pipeline.check_for_updates().await, CheckOutcome::Installed(Version::new(1, 0, 0)));
    assert_eq!(read_record(temp.path()).as_deref(), Some("1.0.0"));
    assert_eq!(std::fs::read_to_string(temp.path().join("Build").join(exe_name()))?, "build one");

    assert_eq!(pipeline.check_for_updates().await, CheckOutcome::UpToDate);

    publish(&server, "1.1.0", game_zip("build two"));
    assert_eq!(pipeline.check_for_updates().await, CheckOutcome::Installed(Version::new(1, 1, 0)));
    assert_eq!(read_record(temp.path()).as_deref(), Some("1.1.0"));
    assert_eq!(std::fs::read_to_string(temp.path().join("Build").join(exe_name()))?, "build two");
    assert!(!temp.path().join("Dominion.zip").exists());

    Ok(())
}

#[tokio::test]
async fn test_server_error_keeps_previous_install() -> Result<()> {
    let server = TestServer::start().await;
    let temp = TempDir::new()?;
    publish(&server, "1.0.0", game_zip("build one"));
    let pipeline = pipeline_for(&server, &temp)?;
    assert!(pipeline.check_for_updates().await.is_ready());

    // New version published but the archive endpoint is broken
    server.respond("/version.txt", 200, "2.0.0");
    server.respond("/Dominion.zip", 500, "oops");

    let outcome = pipeline.check_for_updates().await;
    assert!(matches!(outcome, CheckOutcome::Failed(ref m) if m.contains("500")), "{outcome:?}");
    assert_eq!(read_record(temp.path()).as_deref(), Some("1.0.0"));
    assert_eq!(std::fs::read_to_string(temp.path().join("Build").join(exe_name()))?, "build one");

    let state = pipeline.state();
    assert_eq!(state.status, Some(Status::Failed));
    assert_eq!(state.installed_version, Some(Version::new(1, 0, 0)));

    // Retry once the server is fixed
    server.respond("/Dominion.zip", 200, game_zip("build two"));
    assert_eq!(pipeline.check_for_updates().await, CheckOutcome::Installed(Version::new(2, 0, 0)));

    Ok(())
}

#[tokio::test]
async fn test_missing_version_endpoint_fails() -> Result<()> {
    let server = TestServer::start().await;
    let temp = TempDir::new()?;
    std::fs::write(temp.path().join("version.txt"), "1.0.0")?;
    let pipeline = pipeline_for(&server, &temp)?;

    let outcome = pipeline.check_for_updates().await;

    assert!(matches!(outcome, CheckOutcome::Failed(ref m) if m.contains("404")), "{outcome:?}");
    assert_eq!(read_record(temp.path()).as_deref(), Some("1.0.0"));
    Ok(())
}

#[tokio::test]
async fn test_empty_version_body_is_not_an_error() -> Result<()> {
    let server = TestServer::start().await;
    let temp = TempDir::new()?;
    std::fs::write(temp.path().join("version.txt"), "1.0.0")?;
    server.respond("/version.txt", 200, "");
    let pipeline = pipeline_for(&server, &temp)?;

    assert_eq!(pipeline.check_for_updates().await, CheckOutcome::NoRemoteVersion);
    assert_eq!(pipeline.state().status, None);
    Ok(())
}
