use crate::models::args::SetupArgs;
use crate::models::config::JpaDefaults;
use crate::services::output::render_table;
use anyhow::{Context, Result};
use kiln_jpa::{ContainerKind, DataSource, DatabaseType, setup_unit};

/// Lists every container kind with its configurer and a short description.
pub fn list_containers() {
    let rows: Vec<(String, String)> = ContainerKind::ALL
        .iter()
        .map(|kind| (kind.to_string(), format!("{} ({})", kind.description(), kind.configurer().name())))
        .collect();

    render_table("Containers", ["Kind", "Description"], &rows);
}

/// Configures a persistence unit and prints it as pretty JSON.
///
/// Flags win over the configured [`JpaDefaults`].
///
/// # Errors
/// Returns an error if no container kind is known, the data source lacks what the container
/// needs, or the unit cannot be serialized.
pub fn setup(args: &SetupArgs, defaults: &JpaDefaults) -> Result<()> {
    let kind = args
        .container
        .or(defaults.container)
        .context("No container kind given; pass --container or set jpa.container")?;
    let provider = args.provider.unwrap_or(defaults.provider);
    let unit_name = args.unit.as_deref().unwrap_or(&defaults.unit_name);
    let source = data_source(args, args.database.or(defaults.database));

    let unit = setup_unit(kind, provider, unit_name, &source)?;

    println!("{}", serde_json::to_string_pretty(&unit)?);
    Ok(())
}

fn data_source(args: &SetupArgs, database: Option<DatabaseType>) -> DataSource {
    let mut source = DataSource::new();
    if let Some(database) = database {
        source = source.with_database(database);
    }
    if let Some(jndi) = &args.jndi {
        source = source.with_jndi_name(jndi);
    }
    if let Some(url) = &args.url {
        source = source.with_url(url);
    }
    if let Some(driver) = &args.driver {
        source = source.with_jdbc_driver(driver);
    }
    if let Some(user) = &args.user {
        source = source.with_username(user);
    }
    if let Some(password) = &args.password {
        source = source.with_password(password);
    }
    source
}
