//! Connection settings and the catalog of connection classes

use serde::Deserialize;

use crate::builder::BuildError;

/// Display name → connection class identifier
///
/// Entries with an empty class have no direct connection class.
pub const CONNECTION_CLASSES: &[(&str, &str)] = &[
    ("Actian Vectorwise", "vectorwise"),
    ("Amazon EMR", "awshadoophive"),
    ("Amazon Redshift", "redshift"),
    ("Aster Database", "asterncluster"),
    ("Cloudera Hadoop", "hadoophive"),
    ("DataStax Enterprise", "datastax"),
    ("EXASolution", "exasolution"),
    ("Firebird", "firebird"),
    ("Generic ODBC", "genericodbc"),
    ("Google Analytics", "google-analytics"),
    ("Google BigQuery", "bigquery"),
    ("Hortonworks Hadooop Hive", "hortonworkshadoophive"),
    ("HP Vertica", "vertica"),
    ("IBM BigInsights", "bigsql"),
    ("IBM DB2", "db2"),
    ("JavaScript Connector", "jsconnector"),
    ("MapR Hadoop Hive", "maprhadoophive"),
    ("MarkLogic", "marklogic"),
    ("Microsoft Access", "msaccess"),
    ("Microsoft Analysis Services", "msolap"),
    ("Microsoft Excel", ""),
    ("Microsoft PowerPivot", "powerpivot"),
    ("Microsoft SQL Server", "sqlserver"),
    ("MySQL", "mysql"),
    ("IBM Netezza", "netezza"),
    ("OData", "odata"),
    ("Oracle", "oracle"),
    ("Oracle Essbase", "essbase"),
    ("ParAccel", "paraccel"),
    ("Pivotal Greenplum", "greenplum"),
    ("PostgreSQL", "postgres"),
    ("Progress OpenEdge", "progressopenedge"),
    ("SAP HANA", "saphana"),
    ("SAP Netweaver Business Warehouse", "sapbw"),
    ("SAP Sybase ASE", "sybasease"),
    ("SAP Sybase IQ", "sybaseiq"),
    ("Salesforce", "salesforce"),
    ("Spark SQL", "spark"),
    ("Splunk", "splunk"),
    ("Statistical File", ""),
    ("Tableau Data Extract", "dataengine"),
    ("Teradata", "teradata"),
    ("Text file", "csv"),
];

/// Resolve a display name or a class identifier to a connection class
pub fn resolve_connection_class(name: &str) -> Result<&'static str, BuildError> {
    let found = CONNECTION_CLASSES
        .iter()
        .find(|(display, class)| *display == name || (!class.is_empty() && *class == name));

    match found {
        Some((_, class)) if !class.is_empty() => Ok(class),
        Some((display, _)) => Err(BuildError::InvalidArgument(format!(
            "'{}' has no connection class and cannot be generated",
            display
        ))),
        None => Err(BuildError::InvalidArgument(format!(
            "'{}' is not an acceptable connection type",
            name
        ))),
    }
}

/// Connection settings for a generated datasource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionSettings {
    /// Connection type: display name or class identifier
    #[serde(rename = "type")]
    pub connection_type: String,
    pub name: String,
    pub server: Option<String>,
    pub dbname: String,
    #[serde(default = "default_authentication")]
    pub authentication: String,
    /// SQL run once when the connection opens
    pub initial_sql: Option<String>,
}

fn default_authentication() -> String {
    "sspi".to_string()
}

impl ConnectionSettings {
    pub fn new(
        connection_type: impl Into<String>,
        name: impl Into<String>,
        dbname: impl Into<String>,
    ) -> Self {
        Self {
            connection_type: connection_type.into(),
            name: name.into(),
            server: None,
            dbname: dbname.into(),
            authentication: default_authentication(),
            initial_sql: None,
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_authentication(mut self, authentication: impl Into<String>) -> Self {
        self.authentication = authentication.into();
        self
    }

    pub fn with_initial_sql(mut self, sql: impl Into<String>) -> Self {
        self.initial_sql = Some(sql.into());
        self
    }
}
