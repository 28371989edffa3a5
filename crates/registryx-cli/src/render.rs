//! Terminal rendering for search results, counts, and the registry's
//! project views (listing, summary, roster, work breakdown).
//!
//! [`TerminalAdapter`] is the CLI's [`PresentationAdapter`]: it writes every
//! session outcome to one writer in the configured [`OutputFormat`].

use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use registryx_core::document::format_percent;
use registryx_core::{
    Error, PresentationAdapter, ProjectList, ProjectSummary, ProjectSummaryReport, SearchResults,
    TeamRoster, WbsGraph,
};

use crate::OutputFormat;

/// Characters of preview shown per row in table output.
const TABLE_PREVIEW_CHARS: usize = 60;

/// Renders session outcomes to a writer.
#[derive(Debug)]
pub struct TerminalAdapter<W> {
    format: OutputFormat,
    out: W,
}

impl TerminalAdapter<io::Stdout> {
    /// Creates an adapter writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, io::stdout())
    }
}

impl<W: Write> TerminalAdapter<W> {
    /// Creates an adapter writing to `out`.
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    /// The configured output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Consumes the adapter, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a line of plain text, ignoring the output format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Writes the shell prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "registryx> ")?;
        self.out.flush()
    }

    /// Writes the project list, grouped by family when the registry grouped it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_projects(&mut self, projects: &ProjectList) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(projects);
        }
        let grouped = projects.populated_groups().next().is_some();
        if projects.items.is_empty() && !grouped {
            return writeln!(self.out, "No projects found");
        }

        match self.format {
            OutputFormat::Text if grouped => {
                for (family, members) in projects.populated_groups() {
                    writeln!(self.out, "{} ({})", family.bold(), members.len())?;
                    for p in members {
                        writeln!(self.out, "  {}  {}", p.project_id.bold(), p.name)?;
                    }
                    writeln!(self.out)?;
                }
            }
            OutputFormat::Text => {
                writeln!(self.out, "Projects:")?;
                writeln!(self.out)?;
                for p in &projects.items {
                    writeln!(self.out, "  {}  {}", p.project_id.bold(), p.name)?;
                }
            }
            _ => {
                #[derive(Tabled)]
                struct ProjectRow<'a> {
                    #[tabled(rename = "Family")]
                    family: &'a str,
                    #[tabled(rename = "Project ID")]
                    project_id: &'a str,
                    #[tabled(rename = "Name")]
                    name: &'a str,
                }

                fn row<'a>(family: &'a str, p: &'a ProjectSummary) -> ProjectRow<'a> {
                    ProjectRow {
                        family,
                        project_id: &p.project_id,
                        name: &p.name,
                    }
                }

                let rows: Vec<_> = if grouped {
                    projects
                        .populated_groups()
                        .flat_map(|(family, members)| members.iter().map(move |p| row(family, p)))
                        .collect()
                } else {
                    projects.items.iter().map(|p| row("", p)).collect()
                };
                writeln!(self.out, "{}", Table::new(rows))?;
            }
        }
        let noun = if projects.count == 1 { "project" } else { "projects" };
        writeln!(self.out, "{} {noun}", projects.count)
    }

    /// Writes project counts per family, channel, category, status and
    /// completion bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_summary(&mut self, summary: &ProjectSummaryReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => return self.write_json(summary),
            OutputFormat::Text => {
                for (title, counts) in summary.sections() {
                    if counts.is_empty() {
                        continue;
                    }
                    writeln!(self.out, "{}", title.bold())?;
                    for (label, count) in counts {
                        writeln!(self.out, "  {label:<24} {count:>5}")?;
                    }
                    writeln!(self.out)?;
                }
            }
            OutputFormat::Table => {
                #[derive(Tabled)]
                struct SummaryRow<'a> {
                    #[tabled(rename = "Breakdown")]
                    section: &'static str,
                    #[tabled(rename = "Value")]
                    label: &'a str,
                    #[tabled(rename = "Projects")]
                    count: u64,
                }

                let rows: Vec<_> = summary
                    .sections()
                    .into_iter()
                    .flat_map(|(section, counts)| {
                        counts.iter().map(move |(label, count)| SummaryRow {
                            section,
                            label: label.as_str(),
                            count: *count,
                        })
                    })
                    .collect();
                if !rows.is_empty() {
                    writeln!(self.out, "{}", Table::new(rows))?;
                }
            }
        }
        writeln!(self.out, "Total projects: {}", summary.total)
    }

    /// Writes a project's work breakdown as phases with their tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_wbs(&mut self, graph: &WbsGraph) -> io::Result<()> {
        let root = graph.project.id.as_str();
        match self.format {
            OutputFormat::Json => self.write_json(graph),
            OutputFormat::Text => {
                writeln!(self.out, "{} ({root})", graph.project.name.bold())?;
                for phase in graph.children(root) {
                    writeln!(self.out, "  {}", phase.label)?;
                    for task in graph.children(&phase.id) {
                        writeln!(self.out, "    - {} {}", task.label, task.id.dimmed())?;
                    }
                }
                Ok(())
            }
            OutputFormat::Table => {
                #[derive(Tabled)]
                struct WbsRow<'a> {
                    #[tabled(rename = "Phase")]
                    phase: &'a str,
                    #[tabled(rename = "Task ID")]
                    task_id: &'a str,
                    #[tabled(rename = "Task")]
                    task: &'a str,
                }

                let mut rows = Vec::new();
                for phase in graph.children(root) {
                    let mut tasks = graph.children(&phase.id).peekable();
                    if tasks.peek().is_none() {
                        rows.push(WbsRow {
                            phase: &phase.label,
                            task_id: "",
                            task: "",
                        });
                    }
                    rows.extend(tasks.map(|task| WbsRow {
                        phase: &phase.label,
                        task_id: &task.id,
                        task: &task.label,
                    }));
                }
                writeln!(self.out, "Work breakdown for {} ({root})", graph.project.name)?;
                writeln!(self.out, "{}", Table::new(rows))
            }
        }
    }

    /// Writes a team roster.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_roster(&mut self, roster: &TeamRoster) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(roster);
        }

        let Some(selected) = roster.selected.as_deref() else {
            return writeln!(self.out, "No projects found");
        };
        match roster.selected_name() {
            Some(name) => writeln!(self.out, "Team for {name} ({selected})")?,
            None => writeln!(self.out, "Team for {selected}")?,
        }
        writeln!(self.out)?;

        if roster.members.is_empty() {
            return writeln!(self.out, "No team members assigned");
        }

        #[derive(Tabled)]
        struct MemberRow<'a> {
            #[tabled(rename = "Role")]
            role: &'a str,
            #[tabled(rename = "Assignee")]
            assignee: &'a str,
            #[tabled(rename = "Capacity %")]
            capacity_pct: &'a str,
            #[tabled(rename = "Work Packages")]
            work_packages: &'a str,
            #[tabled(rename = "Notes")]
            notes: &'a str,
        }

        let rows = roster.members.iter().map(|m| MemberRow {
            role: &m.role,
            assignee: &m.assignee,
            capacity_pct: &m.capacity_pct,
            work_packages: &m.work_packages,
            notes: &m.notes,
        });
        writeln!(self.out, "{}", Table::new(rows))
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.out, "{rendered}")
    }

    fn write_count(&mut self, count: u64) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&serde_json::json!({ "count": count })),
            OutputFormat::Text | OutputFormat::Table => {
                writeln!(self.out, "Indexed documents: {}", count.bold())
            }
        }
    }

    fn write_results(&mut self, results: &SearchResults) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => return self.write_json(results),
            // An empty query clears the result area and shows nothing.
            _ if results.query.is_empty() => return Ok(()),
            _ if results.is_empty() => {
                return writeln!(self.out, "No matches for '{}'", results.query);
            }
            OutputFormat::Text => {
                for hit in &results.hits {
                    writeln!(self.out, "{}", hit.record.name.bold())?;
                    writeln!(self.out, "  {}", hit.meta_line().dimmed())?;
                    for line in hit.preview.lines() {
                        writeln!(self.out, "    {line}")?;
                    }
                    writeln!(self.out)?;
                }
            }
            OutputFormat::Table => {
                #[derive(Tabled)]
                struct HitRow<'a> {
                    #[tabled(rename = "Name")]
                    name: &'a str,
                    #[tabled(rename = "Family")]
                    family: &'a str,
                    #[tabled(rename = "Channel")]
                    channel: &'a str,
                    #[tabled(rename = "Status")]
                    status: &'a str,
                    #[tabled(rename = "%")]
                    percent: String,
                    #[tabled(rename = "Preview")]
                    preview: String,
                }

                let rows = results.hits.iter().map(|hit| HitRow {
                    name: &hit.record.name,
                    family: hit.record.family.as_deref().unwrap_or_default(),
                    channel: hit.record.channel.as_deref().unwrap_or_default(),
                    status: hit.record.status.as_deref().unwrap_or_default(),
                    percent: hit
                        .record
                        .percent_complete
                        .map(format_percent)
                        .unwrap_or_default(),
                    preview: one_line(&hit.preview, TABLE_PREVIEW_CHARS),
                });
                writeln!(self.out, "{}", Table::new(rows))?;
            }
        }

        if results.truncated() {
            writeln!(
                self.out,
                "Showing {} of {} matches",
                results.len(),
                results.total_matches
            )?;
        } else {
            let noun = if results.total_matches == 1 { "match" } else { "matches" };
            writeln!(self.out, "{} {noun}", results.total_matches)?;
        }
        Ok(())
    }

    fn write_error(&mut self, error: &Error) -> io::Result<()> {
        let causes = causes(error);
        match self.format {
            OutputFormat::Json => self.write_json(&serde_json::json!({
                "error": error.to_string(),
                "causes": causes,
            })),
            OutputFormat::Text | OutputFormat::Table => {
                write!(self.out, "{} {error}", "error:".red().bold())?;
                for cause in &causes {
                    write!(self.out, ": {cause}")?;
                }
                writeln!(self.out)
            }
        }
    }

    fn report(&mut self, what: &str, result: io::Result<()>) {
        let result = result.and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to render {what}");
        }
    }
}

impl<W: Write> PresentationAdapter for TerminalAdapter<W> {
    fn show_count(&mut self, count: u64) {
        let result = self.write_count(count);
        self.report("count", result);
    }

    fn show_results(&mut self, results: &SearchResults) {
        let result = self.write_results(results);
        self.report("search results", result);
    }

    fn show_error(&mut self, error: &Error) {
        let result = self.write_error(error);
        self.report("error", result);
    }
}

/// Messages of every error below `error` in its source chain.
fn causes(error: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut next = std::error::Error::source(error);
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }
    causes
}

/// Collapses whitespace and cuts to `max` characters, marking the cut.
fn one_line(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max).collect();
    cut.push('…');
    cut
}
