use kiln_jpa::*;
use proptest::prelude::*;

const PLATFORM: &str = "hibernate.transaction.jta.platform";

fn unit_for(provider: &str) -> PersistenceUnit {
    let mut unit = PersistenceUnit::new("forge-default").with_provider(provider);
    unit.property("user.key", "kept");
    unit
}

fn jndi(name: &str) -> DataSource {
    DataSource::new().with_jndi_name(name)
}

/// Sets one shared key so tests can observe which layer wrote last.
#[derive(Debug)]
struct Stamp;

impl Configurer for Stamp {
    fn name(&self) -> &'static str {
        "stamp"
    }

    fn configure(&self, mut unit: PersistenceUnit, _: &DataSource) -> Result<PersistenceUnit, JpaError> {
        unit.property("layer", "general");
        unit.property("general.only", "yes");
        Ok(unit)
    }
}

const MIDDLE: &[ProviderTuning] =
    &[ProviderTuning { providers: &["acme"], properties: &[("layer", "middle"), ("middle.only", "yes")] }];
const OUTER: &[ProviderTuning] = &[ProviderTuning { providers: &["acme"], properties: &[("layer", "outer")] }];

static CHAIN: Specialized<Specialized<Stamp>> =
    Specialized::new("outer", Specialized::new("middle", Stamp, MIDDLE), OUTER);

#[test]
fn test_weblogic_binds_jta_and_tunes_hibernate() {
    let unit = resolve(ContainerKind::Weblogic12c).configure(unit_for(provider::HIBERNATE), &jndi("jdbc/shop")).unwrap();

    assert_eq!(unit.name(), "forge-default");
    assert_eq!(unit.provider(), Some(provider::HIBERNATE));
    assert_eq!(unit.transaction_type(), Some(TransactionType::Jta));
    assert_eq!(unit.jta_data_source(), Some("jdbc/shop"));
    assert_eq!(unit.non_jta_data_source(), None);
    assert_eq!(
        unit.property_value(PLATFORM),
        Some("org.hibernate.service.jta.platform.internal.WeblogicJtaPlatform")
    );
    assert_eq!(unit.property_value("user.key"), Some("kept"));
}

#[test]
fn test_weblogic_overwrites_existing_platform() {
    let mut unit = unit_for(provider::HIBERNATE);
    unit.property(PLATFORM, "com.example.Platform");

    let unit = resolve(ContainerKind::Weblogic12c).configure(unit, &jndi("jdbc/shop")).unwrap();

    assert_eq!(
        unit.property_value(PLATFORM),
        Some("org.hibernate.service.jta.platform.internal.WeblogicJtaPlatform")
    );
}

#[test]
fn test_weblogic_tunes_eclipselink_and_newer_hibernate() {
    let source = jndi("jdbc/shop");
    let weblogic = resolve(ContainerKind::Weblogic12c);

    let unit = weblogic.configure(unit_for(provider::ECLIPSELINK), &source).unwrap();
    assert_eq!(unit.property_value("eclipselink.target-server"), Some("WebLogic"));
    assert_eq!(unit.property_value(PLATFORM), None);

    let unit = weblogic.configure(unit_for(provider::HIBERNATE_JPA), &source).unwrap();
    assert_eq!(
        unit.property_value(PLATFORM),
        Some("org.hibernate.engine.transaction.jta.platform.internal.WeblogicJtaPlatform")
    );
}

#[test]
fn test_weblogic_passes_other_providers_through() {
    let source = jndi("jdbc/shop");
    let general = resolve(ContainerKind::CustomJta).configure(unit_for(provider::OPENJPA), &source).unwrap();
    let special = resolve(ContainerKind::Weblogic12c).configure(unit_for(provider::OPENJPA), &source).unwrap();
    assert_eq!(special, general);

    let anonymous = PersistenceUnit::new("no-provider");
    let general = resolve(ContainerKind::CustomJta).configure(anonymous.clone(), &source).unwrap();
    let special = resolve(ContainerKind::Weblogic12c).configure(anonymous, &source).unwrap();
    assert_eq!(special, general);
}

#[test]
fn test_chain_runs_general_first_and_outermost_last() {
    let unit = CHAIN.configure(PersistenceUnit::new("pu").with_provider("acme"), &DataSource::new()).unwrap();

    assert_eq!(unit.property_value("layer"), Some("outer"));
    assert_eq!(unit.property_value("middle.only"), Some("yes"));
    assert_eq!(unit.property_value("general.only"), Some("yes"));

    let other = CHAIN.configure(PersistenceUnit::new("pu").with_provider("other"), &DataSource::new()).unwrap();
    let general = Stamp.configure(PersistenceUnit::new("pu").with_provider("other"), &DataSource::new()).unwrap();
    assert_eq!(other, general);
}

#[test]
fn test_general_failure_stops_the_chain() {
    for kind in [ContainerKind::CustomJta, ContainerKind::CustomNonJta, ContainerKind::Weblogic12c] {
        let err = resolve(kind).configure(unit_for(provider::HIBERNATE), &DataSource::new()).unwrap_err();
        assert!(matches!(err, JpaError::MissingDataSource { .. }), "{kind}: {err}");
    }
}

#[test]
fn test_non_jta_uses_resource_local() {
    let mut unit = unit_for(provider::HIBERNATE);
    unit.set_jta_data_source("stale");

    let unit = resolve(ContainerKind::CustomNonJta).configure(unit, &jndi("java:/Local")).unwrap();

    assert_eq!(unit.transaction_type(), Some(TransactionType::ResourceLocal));
    assert_eq!(unit.non_jta_data_source(), Some("java:/Local"));
    assert_eq!(unit.jta_data_source(), None);
}

#[test]
fn test_application_servers_use_their_default_data_source() {
    let cases = [
        (ContainerKind::JbossAs6, "java:/DefaultDS"),
        (ContainerKind::JbossAs7, "java:jboss/datasources/ExampleDS"),
        (ContainerKind::Glassfish3, "jdbc/__default"),
    ];
    for (kind, expected) in cases {
        let unit = resolve(kind).configure(unit_for(provider::HIBERNATE), &jndi("jdbc/ignored")).unwrap();
        assert_eq!(unit.jta_data_source(), Some(expected), "{kind}");
        assert_eq!(unit.transaction_type(), Some(TransactionType::Jta));
    }
}

#[test]
fn test_custom_jdbc_writes_connection_properties() {
    let source = DataSource::new()
        .with_url("jdbc:postgresql://localhost/shop")
        .with_database(DatabaseType::Postgres)
        .with_username("shop");

    let unit = resolve(ContainerKind::CustomJdbc).configure(unit_for(provider::HIBERNATE), &source).unwrap();

    assert_eq!(unit.transaction_type(), Some(TransactionType::ResourceLocal));
    assert_eq!(unit.jta_data_source(), None);
    assert_eq!(unit.property_value(JDBC_DRIVER), Some("org.postgresql.Driver"));
    assert_eq!(unit.property_value(JDBC_URL), Some("jdbc:postgresql://localhost/shop"));
    assert_eq!(unit.property_value(JDBC_USER), Some("shop"));
    assert_eq!(unit.property_value(JDBC_PASSWORD), None);
}

#[test]
fn test_custom_jdbc_requires_url_and_driver() {
    let jdbc = resolve(ContainerKind::CustomJdbc);

    let err = jdbc.configure(unit_for(provider::HIBERNATE), &DataSource::new()).unwrap_err();
    assert!(matches!(err, JpaError::MissingConnection { .. }));

    let err = jdbc
        .configure(unit_for(provider::HIBERNATE), &DataSource::new().with_url("jdbc:h2:mem:test"))
        .unwrap_err();
    assert!(matches!(err, JpaError::MissingConnection { .. }));
}

#[test]
fn test_setup_unit_applies_container_then_provider() {
    let unit = setup_unit(ContainerKind::JbossAs7, Provider::Hibernate, "shop", &DataSource::new()).unwrap();

    assert_eq!(unit.provider(), Some(provider::HIBERNATE));
    assert_eq!(unit.jta_data_source(), Some("java:jboss/datasources/ExampleDS"));
    assert_eq!(unit.property_value("hibernate.dialect"), Some("org.hibernate.dialect.H2Dialect"));
    assert_eq!(unit.property_value("hibernate.hbm2ddl.auto"), Some("create-drop"));

    let err = setup_unit(ContainerKind::CustomJta, Provider::EclipseLink, "shop", &DataSource::new())
        .unwrap_err();
    assert!(err.to_string().contains("CUSTOM_JTA"), "{err}");
}

fn provider_identity() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(provider::HIBERNATE.to_owned()),
        Just(provider::HIBERNATE_JPA.to_owned()),
        Just(provider::ECLIPSELINK.to_owned()),
        Just(provider::OPENJPA.to_owned()),
        "[a-z.]{1,20}",
    ]
}

proptest! {
    #[test]
    fn prop_weblogic_only_adds_tuning_keys(
        provider in provider_identity(),
        properties in prop::collection::btree_map("[a-z.]{1,16}", "[a-zA-Z0-9]{0,8}", 0..8),
    ) {
        let mut unit = PersistenceUnit::new("pu").with_provider(provider.clone());
        for (key, value) in &properties {
            unit.property(key.clone(), value.clone());
        }
        let source = jndi("jdbc/prop");

        let general = resolve(ContainerKind::CustomJta).configure(unit.clone(), &source).unwrap();
        let special = resolve(ContainerKind::Weblogic12c).configure(unit, &source).unwrap();

        prop_assert_eq!(special.name(), general.name());
        prop_assert_eq!(special.provider(), general.provider());
        prop_assert_eq!(special.transaction_type(), general.transaction_type());
        prop_assert_eq!(special.jta_data_source(), general.jta_data_source());

        let tuned: Vec<(&str, &str)> = WEBLOGIC_TUNINGS
            .iter()
            .filter(|t| t.applies_to(&provider))
            .flat_map(|t| t.properties.iter().copied())
            .collect();
        for (key, value) in special.properties() {
            match tuned.iter().find(|(k, _)| *k == key.as_str()) {
                Some((_, tuned_value)) => {
                    prop_assert_eq!(value.as_str(), *tuned_value);
                }
                None => {
                    prop_assert_eq!(Some(value), general.properties().get(key));
                }
            }
        }
        if tuned.is_empty() {
            prop_assert_eq!(special, general);
        }
    }
}
