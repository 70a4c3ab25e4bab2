//! Team Planner command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from the environment and global flags.
//! - Open the store, run exactly one command, and exit non-zero on failure.

mod args;
mod commands;

use crate::args::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use team_planner_core::db::open_db;
use team_planner_core::{init_logging, LoadStatus, PlannerConfig, PlannerService, SqliteStateRepository};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open planner database {}", config.db_path.display()))?;
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn))?;
    if service.load_status() == LoadStatus::Discarded {
        eprintln!("warning: stored planner data was unreadable; starting with an empty planner");
    }
    info!("event=cli_command module=cli status=start");

    let stdout = std::io::stdout();
    commands::run(&mut service, cli.command, &mut stdout.lock())
}

/// Environment first, then explicit flags.
fn resolve_config(cli: &Cli) -> Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env().context("invalid TEAM_PLANNER_LOG_LEVEL")?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db.clone());
    }
    if let Some(log_dir) = &cli.log_dir {
        config = config.with_log_dir(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level)?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use crate::args::Cli;
    use crate::commands::run;
    use clap::Parser;
    use team_planner_core::db::open_db_in_memory;
    use team_planner_core::{PlannerService, SqliteStateRepository};

    fn exec(service: &mut PlannerService<SqliteStateRepository<'_>>, argv: &[&str]) -> String {
        let cli = Cli::try_parse_from(std::iter::once("team-planner").chain(argv.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        run(service, cli.command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn exec_err(
        service: &mut PlannerService<SqliteStateRepository<'_>>,
        argv: &[&str],
    ) -> anyhow::Error {
        let cli = Cli::try_parse_from(std::iter::once("team-planner").chain(argv.iter().copied()))
            .unwrap();
        run(service, cli.command, &mut Vec::<u8>::new()).unwrap_err()
    }

    #[test]
    fn team_member_and_interaction_commands_update_the_store() {
        let conn = open_db_in_memory().unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();

        let a = exec(&mut service, &["team", "add", "Checkout", "-t", "stream-aligned"]);
        let b = exec(&mut service, &["team", "add", "Payments", "-t", "platform"]);
        let (a, b) = (a.trim().to_string(), b.trim().to_string());

        exec(&mut service, &["member", "add", &a, "Ada Lovelace", "Engineer"]);
        let index = exec(&mut service, &["interaction", "add", &a, &b, "-t", "x-as-a-service"]);
        assert_eq!(index.trim(), "0");

        let listing = exec(&mut service, &["team", "list"]);
        assert!(listing.contains("Checkout [Stream-Aligned Team]"));
        assert!(listing.contains("(AL)"));
        assert!(listing.contains("No description provided"));

        let interactions = exec(&mut service, &["interaction", "list"]);
        assert!(interactions.contains("0  Checkout -> Payments  X-as-a-Service"));

        exec(&mut service, &["team", "delete", &b]);
        assert_eq!(service.planner().interactions().len(), 1);
        let dangling = exec(&mut service, &["interaction", "list"]);
        assert!(dangling.contains(&format!("<missing {b}>")));
        assert!(service.diagram_view().unwrap().edges.is_empty());
    }

    #[test]
    fn team_update_keeps_unspecified_fields() {
        let conn = open_db_in_memory().unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();

        let stream = exec(&mut service, &["stream", "add", "Retail"]);
        let stream = stream.trim();
        let id = exec(
            &mut service,
            &["team", "add", "Search", "-t", "enabling", "--description", "coaching", "--stream", stream],
        );
        let id = id.trim();

        exec(&mut service, &["team", "update", id, "--name", "Discovery"]);

        let team = service.planner().team(id).unwrap();
        assert_eq!(team.name, "Discovery");
        assert_eq!(team.description, "coaching");
        assert_eq!(team.value_streams, vec![stream.to_string()]);

        exec(&mut service, &["team", "update", id, "--clear-streams"]);
        assert!(service.planner().team(id).unwrap().value_streams.is_empty());
    }

    #[test]
    fn import_over_existing_teams_needs_yes() {
        let conn = open_db_in_memory().unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
        exec(&mut service, &["team", "add", "Existing", "-t", "platform"]);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plan.team");
        std::fs::write(
            &file,
            r#"{"teams":[{"id":"t1","name":"Imported","type":"enabling"},{"id":"t2","name":"Other","type":"platform"}],"interactions":[]}"#,
        )
        .unwrap();
        let file = file.to_str().unwrap();

        let err = exec_err(&mut service, &["import", file]);
        assert!(err
            .to_string()
            .contains("This will replace your current 1 team(s) with 2 imported team(s)."));
        assert_eq!(service.planner().teams()[0].name, "Existing");

        let output = exec(&mut service, &["import", file, "--yes"]);
        assert_eq!(output.trim(), "Imported 2 team(s).");
        assert_eq!(service.planner().teams().len(), 2);
    }

    #[test]
    fn export_writes_to_requested_file() {
        let conn = open_db_in_memory().unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
        exec(&mut service, &["team", "add", "Core", "-t", "complicated-subsystem"]);

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.team");
        exec(&mut service, &["export", "--out", target.to_str().unwrap()]);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(written["teams"][0]["type"], "complicated-subsystem");
        assert!(written["valueStreams"].is_array());
    }

    #[test]
    fn diagram_prints_nodes_after_placing_them() {
        let conn = open_db_in_memory().unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
        let solo = exec(&mut service, &["team", "add", "Solo", "-t", "enabling"]);
        let core = exec(&mut service, &["team", "add", "Core", "-t", "platform"]);
        let (solo, core) = (solo.trim().to_string(), core.trim().to_string());
        exec(&mut service, &["interaction", "add", &solo, &core, "-t", "facilitation"]);

        let output = exec(&mut service, &["diagram"]);
        assert!(output.contains("node Solo [Enabling] at (600.0, 300.0)"));
        assert!(output.contains("node Core [Platform] at (200.0, 300.0)"));
        assert!(output.contains("edge 0 Solo -> Core (Facilitation)"));
        assert!(service.planner().teams().iter().all(|team| team.position().is_some()));
    }
}
