//! Typst template and PDF compilation.

use chrono::Local;
use tracing::{debug, error};
use typst_pdf::PdfOptions;

use crate::ReportError;
use crate::summary::{Summary, SummaryLine};
use crate::world::PdfWorld;

const SUMMARY_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (x: 2cm, y: 2.5cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{TITLE}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 9pt)[Generated {{DATE}}]],
      align(right)[#text(size: 9pt)[Page #counter(page).display()]],
    )
  ]
)

#set text(size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[{{TITLE}}]
    #v(4pt)
    #text(size: 14pt)[{{HEADING}}]
  ]
]

#v(12pt)

#table(
  columns: (1fr, auto),
  stroke: 0.5pt + gray,
  inset: 8pt,
  align: (left, right),
  table.header([*Item*], [*Value*]),
{{ROWS}}
)

#v(12pt)
#text(size: 9pt, fill: gray)[Estimates only. Figures are rounded to the nearest cent.]
"##;

/// Escape special Typst markup characters.
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn build_rows(lines: &[SummaryLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "  [{}], [{}],",
                escape_typst(line.label),
                escape_typst(&line.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_source(
    title: &str,
    heading: &str,
    lines: &[SummaryLine],
) -> String {
    SUMMARY_TEMPLATE
        .replace("{{TITLE}}", &escape_typst(title))
        .replace("{{HEADING}}", &escape_typst(heading))
        .replace("{{DATE}}", &Local::now().format("%Y-%m-%d").to_string())
        .replace("{{ROWS}}", &build_rows(lines))
}

/// Compiles a one-page table of summary lines to PDF bytes.
///
/// `title` appears in the page header and title block; `heading` names the
/// worksheet underneath it.
pub fn render_summary_pdf(
    title: &str,
    heading: &str,
    lines: &[SummaryLine],
) -> Result<Vec<u8>, ReportError> {
    let world = PdfWorld::new(build_source(title, heading, lines));

    let warned = typst::compile(&world);
    let document = warned.output.map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        error!(errors = ?messages, "typst compilation failed");
        ReportError::Compile(messages.join("; "))
    })?;

    let bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        error!(errors = ?messages, "pdf export failed");
        ReportError::Export(messages.join("; "))
    })?;

    debug!(heading, size = bytes.len(), "rendered summary pdf");
    Ok(bytes)
}

/// Renders the summary of one calculation of worksheet `W`.
///
/// ```no_run
/// use propcalc_core::{FeasibilityInputs, FeasibilityWorksheet, Worksheet};
/// use propcalc_report::render_pdf;
///
/// let input = FeasibilityInputs::baseline();
/// let output = FeasibilityWorksheet.calculate(&input);
/// let pdf = render_pdf::<FeasibilityWorksheet>("Property Calculator", &input, &output).unwrap();
/// std::fs::write("feasibility.pdf", pdf).unwrap();
/// ```
pub fn render_pdf<W: Summary>(
    title: &str,
    input: &W::Input,
    output: &W::Output,
) -> Result<Vec<u8>, ReportError> {
    render_summary_pdf(title, W::TITLE, &W::summary(input, output))
}
