//! Factory functions for registry documents, projects, and rosters.

use registryx_core::{
    DocumentRecord, IndexCollection, ProjectSummary, TeamMember, WbsEdge, WbsGraph, WbsNode,
    WbsProject,
};

/// Creates a record with a name and body text and no tags.
pub fn record(name: &str, text: &str) -> DocumentRecord {
    DocumentRecord::new(name, text)
}

/// Creates a fully tagged record.
pub fn tagged_record(
    name: &str,
    text: &str,
    family: &str,
    channel: &str,
    status: &str,
    percent_complete: f64,
) -> DocumentRecord {
    DocumentRecord {
        family: Some(family.to_string()),
        channel: Some(channel.to_string()),
        status: Some(status.to_string()),
        percent_complete: Some(percent_complete),
        ..DocumentRecord::new(name, text)
    }
}

/// Wraps records in a collection whose reported count equals its length.
pub fn collection(items: Vec<DocumentRecord>) -> IndexCollection {
    let count = items.len() as u64;
    IndexCollection::new(items, count)
}

/// Creates `n` records named `doc-0..doc-{n-1}` whose text contains `needle`.
pub fn matching_records(n: usize, needle: &str) -> Vec<DocumentRecord> {
    (0..n)
        .map(|i| record(&format!("doc-{i}"), &format!("entry {i} {needle}")))
        .collect()
}

/// Two records whose text contains "world" in different cases.
pub fn hello_world_collection() -> IndexCollection {
    collection(vec![
        record("Alpha", "hello world"),
        record("Beta", "WORLD of beta"),
    ])
}

/// Creates a project summary.
pub fn project(project_id: &str, name: &str) -> ProjectSummary {
    ProjectSummary {
        project_id: project_id.to_string(),
        name: name.to_string(),
    }
}

/// Creates a roster row with a role and assignee.
pub fn member(role: &str, assignee: &str) -> TeamMember {
    TeamMember {
        role: role.to_string(),
        assignee: assignee.to_string(),
        ..TeamMember::default()
    }
}

/// Creates a small work breakdown: the project, two phases, and one task
/// under "Offer Design".
pub fn wbs_graph(project_id: &str, name: &str) -> WbsGraph {
    let node = |id: &str, label: &str| WbsNode {
        id: id.to_string(),
        label: label.to_string(),
    };
    let edge = |from: &str, to: &str| WbsEdge {
        from: from.to_string(),
        to: to.to_string(),
    };

    WbsGraph {
        project: WbsProject {
            id: project_id.to_string(),
            name: name.to_string(),
        },
        nodes: vec![
            node(project_id, name),
            node("P1", "Pre-Dev/Hunting"),
            node("P3", "Offer Design"),
            node("T01_draft", "Draft the offer"),
        ],
        edges: vec![
            edge(project_id, "P1"),
            edge(project_id, "P3"),
            edge("P3", "T01_draft"),
        ],
    }
}
