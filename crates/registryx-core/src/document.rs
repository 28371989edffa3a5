//! Wire and domain types for registry documents, projects, and team rosters.
//!
//! The registry is CSV-backed and loosely typed: fields may be missing,
//! `null`, empty, or carry numbers as strings. Decoding never fails on a
//! missing or oddly typed scalar field. Absent text becomes an empty string,
//! absent tags become `None`, absent collections become empty, and absent
//! counts become zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One indexed item returned by the registry search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Display name; matched by queries.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Combined body text; matched by queries and previewed.
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    /// Project family grouping.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub family: Option<String>,
    /// Distribution channel.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel: Option<String>,
    /// Lifecycle status.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// Completion in percent, clamped to `0..=100`.
    #[serde(
        default,
        deserialize_with = "lenient_percent",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_complete: Option<f64>,
    /// Registry project identifier.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<String>,
    /// Project category.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

impl DocumentRecord {
    /// Creates a record with only a name and body text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Renders `family • channel • status • percent%`, leaving missing
    /// segments empty.
    #[must_use]
    pub fn meta_line(&self) -> String {
        let percent = self.percent_complete.map(format_percent).unwrap_or_default();
        format!(
            "{} • {} • {} • {percent}%",
            self.family.as_deref().unwrap_or_default(),
            self.channel.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or_default(),
        )
    }
}

/// The full set of documents returned by one index fetch.
///
/// `count` is the total the registry reports and is independent of
/// `items.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexCollection {
    /// Documents in registry order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<DocumentRecord>,
    /// Reported total.
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
}

impl IndexCollection {
    /// Creates a collection from parts.
    #[must_use]
    pub fn new(items: Vec<DocumentRecord>, count: u64) -> Self {
        Self { items, count }
    }

    /// Returns true when no documents are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of documents held (not the reported count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A registry project as listed by the projects endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// Response of the projects endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    /// Projects in registry order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ProjectSummary>,
    /// Reported total.
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    /// Projects sorted into families by the registry. Families may be empty.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub groups: BTreeMap<String, Vec<ProjectSummary>>,
}

impl ProjectList {
    /// Families that hold at least one project, in name order.
    pub fn populated_groups(&self) -> impl Iterator<Item = (&str, &[ProjectSummary])> {
        self.groups
            .iter()
            .filter(|(_, projects)| !projects.is_empty())
            .map(|(family, projects)| (family.as_str(), projects.as_slice()))
    }
}

/// Project counts broken down by family, channel, category, status and
/// completion bucket.
///
/// Missing labels are reported by the registry as `"unspecified"`; percent
/// values that are not numbers land in the `"Unspecified"` completion bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummaryReport {
    /// Projects per family.
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub families: BTreeMap<String, u64>,
    /// Projects per distribution channel.
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub channels: BTreeMap<String, u64>,
    /// Projects per category.
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub categories: BTreeMap<String, u64>,
    /// Projects per lifecycle status.
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub status: BTreeMap<String, u64>,
    /// Projects per completion bucket (`"0%"`, `"1–39%"`, ..., `"90–100%"`).
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub completion: BTreeMap<String, u64>,
    /// Number of projects counted.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
}

impl ProjectSummaryReport {
    /// The breakdowns paired with their display titles.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &BTreeMap<String, u64>); 5] {
        [
            ("Families", &self.families),
            ("Channels", &self.channels),
            ("Categories", &self.categories),
            ("Status", &self.status),
            ("Completion", &self.completion),
        ]
    }
}

/// The project a work breakdown belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsProject {
    /// Project identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// One node of a work breakdown: the project, a phase, or a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsNode {
    /// Node identifier (project id, `P1`..`P7`, or `T01_verb`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Display label.
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
}

/// A parent-to-child edge of a work breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsEdge {
    /// Parent node id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: String,
    /// Child node id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: String,
}

/// Work breakdown structure of one project, as a node and edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsGraph {
    /// The project at the root of the breakdown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: WbsProject,
    /// Nodes in registry order; the first one is the project itself.
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<WbsNode>,
    /// Edges in registry order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<WbsEdge>,
}

impl WbsGraph {
    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&WbsNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Children of `id` in edge order. Edges to unknown nodes are skipped.
    pub fn children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a WbsNode> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .filter_map(|e| self.node(&e.to))
    }
}

/// One row of a project's team roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Role on the project.
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    /// Person or agent assigned.
    #[serde(default, deserialize_with = "lenient_string")]
    pub assignee: String,
    /// Capacity share, as reported.
    #[serde(default, deserialize_with = "lenient_string")]
    pub capacity_pct: String,
    /// Work packages owned.
    #[serde(default, deserialize_with = "lenient_string")]
    pub work_packages: String,
    /// Free-form notes.
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
}

/// Response of the team endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    /// Project the roster belongs to, when echoed by the registry.
    #[serde(
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<String>,
    /// Roster rows in registry order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<TeamMember>,
}

/// Formats a percentage without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).filter(|s| !s.trim().is_empty()))
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0)))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn lenient_count_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .iter()
        .map(|(label, count)| (label.clone(), count_from_value(count)))
        .collect())
}

/// Accepts integers, non-negative floats (truncated) and numeric strings.
/// Anything else counts as zero.
fn count_from_value(value: &Value) -> u64 {
    let count = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_count)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_count))
        }
        _ => None,
    };
    count.unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_collection_fields_decode_to_empty() {
        let collection: IndexCollection = serde_json::from_value(json!({})).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.count, 0);

        let collection: IndexCollection =
            serde_json::from_value(json!({ "items": null, "count": null })).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.count, 0);
    }

    #[test]
    fn count_is_independent_of_item_length() {
        let collection: IndexCollection = serde_json::from_value(json!({
            "items": [{ "name": "Alpha", "text": "a" }],
            "count": 40,
        }))
        .unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.count, 40);
    }

    #[test]
    fn float_and_string_counts_are_accepted() {
        let count = |v: Value| -> u64 {
            serde_json::from_value::<IndexCollection>(json!({ "count": v }))
                .unwrap()
                .count
        };

        assert_eq!(count(json!(2.0)), 2);
        assert_eq!(count(json!(7.9)), 7);
        assert_eq!(count(json!("12")), 12);
        assert_eq!(count(json!("3.0")), 3);
        assert_eq!(count(json!(-4)), 0);
        assert_eq!(count(json!(-1.5)), 0);
        assert_eq!(count(json!("many")), 0);
    }

    #[test]
    fn project_groups_decode_full_registry_rows() {
        let list: ProjectList = serde_json::from_value(json!({
            "count": 2,
            "items": [
                { "project_id": "P-1", "name": "BOP Boppers", "status": "active" },
                { "project_id": "P-2", "name": "YouTube Shorts" },
            ],
            "groups": {
                "BOP Family": [{ "project_id": "P-1", "name": "BOP Boppers", "status": "active" }],
                "YouTube Automations": [{ "project_id": "P-2", "name": "YouTube Shorts" }],
                "Experiments/Misc": [],
            },
        }))
        .unwrap();

        assert_eq!(list.groups.len(), 3);
        let populated: Vec<_> = list.populated_groups().map(|(family, _)| family).collect();
        assert_eq!(populated, vec!["BOP Family", "YouTube Automations"]);
        assert_eq!(list.groups["BOP Family"][0].project_id, "P-1");

        let bare: ProjectList = serde_json::from_value(json!({ "items": [], "groups": null })).unwrap();
        assert!(bare.groups.is_empty());
    }

    #[test]
    fn summary_report_tolerates_missing_and_odd_counts() {
        let report: ProjectSummaryReport = serde_json::from_value(json!({
            "families": { "Core Platforms": 2, "Experiments/Misc": "1" },
            "channels": { "unspecified": 3.0 },
            "status": null,
            "completion": { "90–100%": 1, "Unspecified": 2 },
            "total": 3,
        }))
        .unwrap();

        assert_eq!(report.families["Core Platforms"], 2);
        assert_eq!(report.families["Experiments/Misc"], 1);
        assert_eq!(report.channels["unspecified"], 3);
        assert!(report.categories.is_empty());
        assert!(report.status.is_empty());
        assert_eq!(report.total, 3);
        assert_eq!(report.sections()[4].0, "Completion");
    }

    #[test]
    fn wbs_children_follow_edges_in_order() {
        let graph: WbsGraph = serde_json::from_value(json!({
            "project": { "id": "P-1", "name": "Launch" },
            "nodes": [
                { "id": "P-1", "label": "Launch" },
                { "id": "P1", "label": "Pre-Dev/Hunting" },
                { "id": "P3", "label": "Offer Design" },
                { "id": "T01_draft", "label": "Draft offer" },
            ],
            "edges": [
                { "from": "P-1", "to": "P1" },
                { "from": "P-1", "to": "P3" },
                { "from": "P3", "to": "T01_draft" },
                { "from": "P3", "to": "T99_missing" },
            ],
        }))
        .unwrap();

        let phases: Vec<_> = graph.children("P-1").map(|n| n.label.as_str()).collect();
        assert_eq!(phases, vec!["Pre-Dev/Hunting", "Offer Design"]);
        let tasks: Vec<_> = graph.children("P3").map(|n| n.id.as_str()).collect();
        assert_eq!(tasks, vec!["T01_draft"]);
        assert_eq!(graph.children("T01_draft").count(), 0);
    }

    #[test]
    fn record_tolerates_nulls_and_csv_strings() {
        let record: DocumentRecord = serde_json::from_value(json!({
            "project_id": "P-001",
            "name": null,
            "family": "BOP Family",
            "channel": "",
            "status": "active",
            "percent_complete": "75",
            "mission": "ignored extra field",
        }))
        .unwrap();

        assert_eq!(record.name, "");
        assert_eq!(record.text, "");
        assert_eq!(record.family.as_deref(), Some("BOP Family"));
        assert_eq!(record.channel, None);
        assert_eq!(record.percent_complete, Some(75.0));
        assert_eq!(record.project_id.as_deref(), Some("P-001"));
    }

    #[test]
    fn percent_complete_accepts_numbers_and_rejects_garbage() {
        let parse = |v: Value| -> Option<f64> {
            serde_json::from_value::<DocumentRecord>(json!({ "percent_complete": v }))
                .unwrap()
                .percent_complete
        };

        assert_eq!(parse(json!(42.5)), Some(42.5));
        assert_eq!(parse(json!(" 90% ")), Some(90.0));
        assert_eq!(parse(json!(150)), Some(100.0));
        assert_eq!(parse(json!("")), None);
        assert_eq!(parse(json!("n/a")), None);
        assert_eq!(parse(json!(null)), None);
    }

    #[test]
    fn meta_line_leaves_missing_segments_empty() {
        let mut record = DocumentRecord::new("Alpha", "body");
        assert_eq!(record.meta_line(), " •  •  • %");

        record.family = Some("Core Platforms".to_string());
        record.status = Some("live".to_string());
        record.percent_complete = Some(80.0);
        assert_eq!(record.meta_line(), "Core Platforms •  • live • 80%");
    }

    #[test]
    fn percent_is_shown_in_parsed_form() {
        let record: DocumentRecord =
            serde_json::from_value(json!({ "name": "Alpha", "percent_complete": "75.50" })).unwrap();
        assert_eq!(record.meta_line(), " •  •  • 75.5%");
    }

    #[test]
    fn team_members_default_every_column() {
        let team: TeamResponse = serde_json::from_value(json!({
            "project_id": "P-7",
            "members": [{ "role": "Lead", "capacity_pct": 50 }],
        }))
        .unwrap();

        assert_eq!(team.members.len(), 1);
        assert_eq!(team.members[0].role, "Lead");
        assert_eq!(team.members[0].capacity_pct, "50");
        assert_eq!(team.members[0].assignee, "");

        let empty: TeamResponse = serde_json::from_value(json!({ "project_id": "P-7" })).unwrap();
        assert!(empty.members.is_empty());
    }
}
