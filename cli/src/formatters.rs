use std::io::Write;

use slate_core::{masonry_columns, split_pinned, Label, Note, NoteStatus};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::args::OutputFormat;

/// Prints note listings in the selected output format
pub struct NoteListFormatter {
    output: OutputFormat,
    columns: usize,
}

impl NoteListFormatter {
    pub fn new(output: OutputFormat, columns: usize) -> Self {
        NoteListFormatter { output, columns }
    }

    pub fn print_notes(&self, notes: &[&Note]) -> std::io::Result<()> {
        match self.output {
            OutputFormat::Json => {
                let stdout = std::io::stdout();
                serde_json::to_writer_pretty(stdout.lock(), notes)?;
                println!();
                Ok(())
            }
            OutputFormat::Plain => {
                for note in notes {
                    println!(
                        "{}\t{}\t{}\t{}",
                        note.id,
                        status_tag(note),
                        note.title,
                        note.labels.join(",")
                    );
                }
                Ok(())
            }
            OutputFormat::Pretty => self.print_pretty(notes),
        }
    }

    fn print_pretty(&self, notes: &[&Note]) -> std::io::Result<()> {
        let mut out = StandardStream::stdout(ColorChoice::Auto);

        if notes.is_empty() {
            writeln!(out, "No notes.")?;
            return Ok(());
        }

        let (pinned, others) = split_pinned(notes);

        if !pinned.is_empty() {
            self.print_section(&mut out, "PINNED", &pinned)?;
        }
        let heading = if pinned.is_empty() { None } else { Some("OTHERS") };
        if !others.is_empty() {
            if let Some(heading) = heading {
                self.print_section(&mut out, heading, &others)?;
            } else {
                self.print_group(&mut out, &others)?;
            }
        }

        Ok(())
    }

    fn print_section(
        &self,
        out: &mut StandardStream,
        heading: &str,
        notes: &[&Note],
    ) -> std::io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Yellow)))?;
        writeln!(out, "{}", heading)?;
        out.reset()?;
        self.print_group(out, notes)
    }

    fn print_group(&self, out: &mut StandardStream, notes: &[&Note]) -> std::io::Result<()> {
        if self.columns <= 1 {
            for note in notes {
                print_note(out, note)?;
            }
            return Ok(());
        }

        for (index, column) in masonry_columns(notes, self.columns).iter().enumerate() {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(out, "-- column {} --", index + 1)?;
            out.reset()?;
            for note in column {
                print_note(out, note)?;
            }
        }
        Ok(())
    }
}

fn print_note(out: &mut StandardStream, note: &Note) -> std::io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(
        out,
        "{}",
        if note.title.is_empty() {
            "(untitled)"
        } else {
            &note.title
        }
    )?;
    out.reset()?;

    let mut markers = Vec::new();
    if note.is_pinned {
        markers.push("pinned");
    }
    if note.is_archived {
        markers.push("archived");
    }
    if note.is_trashed {
        markers.push("trash");
    }
    if !markers.is_empty() {
        write!(out, " [{}]", markers.join(", "))?;
    }
    writeln!(out)?;

    out.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(
        out,
        "  {}  {}  {}",
        note.id,
        note.created_at.format("%Y-%m-%d %H:%M"),
        status_tag(note)
    )?;
    out.reset()?;

    if !note.content.is_empty() {
        writeln!(out, "  {}", truncated(&note.content))?;
    }
    if !note.labels.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        let tags: Vec<String> = note.labels.iter().map(|l| format!("#{}", l)).collect();
        writeln!(out, "  {}", tags.join(" "))?;
        out.reset()?;
    }
    if !note.attachments.is_empty() {
        writeln!(out, "  ({} attachment(s))", note.attachments.len())?;
    }

    Ok(())
}

fn status_tag(note: &Note) -> &'static str {
    match note.status {
        NoteStatus::Open => "open",
        NoteStatus::InProgress => "in-progress",
        NoteStatus::Completed => "completed",
    }
}

fn truncated(content: &str) -> String {
    let text: String = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() > 60 {
        let head: String = text.chars().take(60).collect();
        format!("{}...", head)
    } else {
        text
    }
}

pub fn print_labels(labels: &[Label], output: OutputFormat) -> std::io::Result<()> {
    match output {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), labels)?;
            println!();
            Ok(())
        }
        OutputFormat::Plain => {
            for label in labels {
                println!("{}\t{}", label.name(), label.id().unwrap_or("-"));
            }
            Ok(())
        }
        OutputFormat::Pretty => {
            let mut out = StandardStream::stdout(ColorChoice::Auto);
            for label in labels {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                write!(out, "#{}", label.name())?;
                out.reset()?;
                match label.id() {
                    Some(id) => writeln!(out, "  {}", id)?,
                    None => {
                        out.set_color(ColorSpec::new().set_dimmed(true))?;
                        writeln!(out, "  (note-derived)")?;
                        out.reset()?;
                    }
                }
            }
            Ok(())
        }
    }
}
