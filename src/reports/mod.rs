use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gradeforge::error::GfResult;
use gradeforge::scorer::GradingResult;
use gradeforge::weights::{Preset, Signal};
use serde::Serialize;
use std::path::Path;
use strum::IntoEnumIterator;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRow {
    pub submission: String,
    /// Shares an above-threshold pair with another submission.
    pub flagged: bool,
    pub result: GradingResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedPair {
    pub submission_a: String,
    pub submission_b: String,
    pub similarity: f64,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_grading_report(name: &str, r: &GradingResult) {
    println!(
        "\nSubmission: {}  [{} / preset {}]",
        name,
        r.flags,
        r.preset.number()
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Signal").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Weight"),
        Cell::new("Marks"),
        Cell::new("Out of"),
    ]);
    align_right(&mut table, 1..=4);

    for row in &r.breakdown {
        let marks = Cell::new(format!("{:.2}", row.weighted_marks));
        let marks = if row.weighted_marks < 0.0 {
            marks.fg(Color::Red)
        } else {
            marks
        };
        let label = if row.signal == Signal::Grammar {
            "Grammar Penalty"
        } else {
            row.signal.label()
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.4}", row.raw_score)),
            Cell::new(format!("{:.2}", row.weight)),
            marks,
            Cell::new(format!("{:.2}", row.max_marks)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Bonus"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", r.flat_bonus)).fg(Color::Green),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Marks Obtained").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", r.unclamped_score)),
        Cell::new(""),
        Cell::new(r.final_score.to_string())
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(r.total_marks.to_string()),
    ]);
    println!("{}", table);

    if r.spelling_errors > 0 {
        println!(
            "Spelling errors: {} ({})",
            r.spelling_errors,
            r.scores.misspelled.join(", ")
        );
    }
    println!("Percentage: {:.2}%", r.percentage);
}

pub fn print_grade_summary(rows: &[GradeRow]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Submission").add_attribute(Attribute::Bold),
        Cell::new("Marks").fg(Color::Cyan),
        Cell::new("Total"),
        Cell::new("%"),
        Cell::new("Spelling"),
        Cell::new("Plagiarism"),
    ]);
    align_right(&mut table, 1..=4);

    for row in rows {
        let r = &row.result;
        let plag = if row.flagged {
            Cell::new("FLAGGED").fg(Color::Red)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(&row.submission).add_attribute(Attribute::Bold),
            Cell::new(r.final_score.to_string()).fg(Color::Cyan),
            Cell::new(r.total_marks.to_string()),
            Cell::new(format!("{:.2}", r.percentage)),
            Cell::new(r.spelling_errors.to_string()),
            plag,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_plagiarism_report(pairs: &[FlaggedPair], threshold: f64) {
    if pairs.is_empty() {
        println!("\nNo pairs above {:.2}% similarity.", threshold);
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Submission A").add_attribute(Attribute::Bold),
        Cell::new("Submission B").add_attribute(Attribute::Bold),
        Cell::new("Similarity"),
    ]);
    align_right(&mut table, 2..=2);

    for p in pairs {
        let sim = Cell::new(format!("{:.2}%", p.similarity));
        let sim = if p.similarity > threshold {
            sim.fg(Color::Red).add_attribute(Attribute::Bold)
        } else {
            sim
        };
        table.add_row(vec![
            Cell::new(&p.submission_a),
            Cell::new(&p.submission_b),
            sim,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_presets() {
    let mut table = new_table();
    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Preset").add_attribute(Attribute::Bold),
        Cell::new("Flags"),
    ];
    header.extend(Signal::iter().map(|s| Cell::new(s.to_string())));
    header.push(Cell::new("Sum"));
    table.add_row(header);
    align_right(&mut table, 3..=12);

    for preset in Preset::iter() {
        let w = preset.weights();
        let mut cells = vec![
            Cell::new(preset.number()),
            Cell::new(preset.to_string()).add_attribute(Attribute::Bold),
            Cell::new(preset.flags().to_string()),
        ];
        cells.extend(Signal::iter().map(|s| Cell::new(format!("{:.2}", w.get(s)))));
        cells.push(Cell::new(format!("{:.2}", w.sum())));
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn write_gradesheet_csv(path: &Path, rows: &[GradeRow]) -> GfResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec![
        "submission".to_string(),
        "marks".to_string(),
        "total".to_string(),
        "percentage".to_string(),
        "spelling_errors".to_string(),
        "plagiarism".to_string(),
    ];
    header.extend(Signal::iter().map(|s| s.to_string()));
    wtr.write_record(&header)?;

    for row in rows {
        let r = &row.result;
        let mut record = vec![
            row.submission.clone(),
            r.final_score.to_string(),
            r.total_marks.to_string(),
            format!("{:.2}", r.percentage),
            r.spelling_errors.to_string(),
            if row.flagged { "flagged" } else { "" }.to_string(),
        ];
        record.extend(Signal::iter().map(|s| format!("{:.4}", r.scores.get(s))));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_pairs_csv(path: &Path, pairs: &[FlaggedPair]) -> GfResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["submission_a", "submission_b", "similarity"])?;
    for p in pairs {
        let similarity = format!("{:.2}", p.similarity);
        wtr.write_record([
            p.submission_a.as_str(),
            p.submission_b.as_str(),
            similarity.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
