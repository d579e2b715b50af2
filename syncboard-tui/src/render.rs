use colored::{ColoredString, Colorize};

use syncboard_common::models::LinkLabel;
use syncboard_core::{LinkControl, StatusTable};

fn colorize_label(label: LinkLabel) -> ColoredString {
    let text = format!("{:<12}", label.as_str());
    match label {
        LinkLabel::Loading => text.yellow(),
        LinkLabel::Linked => text.green().bold(),
        LinkLabel::NotLinked => text.normal(),
        LinkLabel::Error => text.red().bold(),
    }
}

fn colorize_control(control: LinkControl) -> ColoredString {
    match control {
        LinkControl::Enabled => control.caption().cyan(),
        LinkControl::Busy => control.caption().yellow(),
        LinkControl::Disabled => control.caption().dimmed(),
    }
}

/// Terminal rendition of the status table.
pub fn render_table(table: &StatusTable) -> String {
    let mut out = String::new();
    let header = format!("{:<12} {:<12} {}\n", "Integration", "Status", "Action");
    out.push_str(&header.bold().to_string());
    for row in &table.rows {
        out.push_str(&format!(
            "{:<12} {} {}\n",
            row.name,
            colorize_label(row.label),
            colorize_control(row.control)
        ));
    }
    if let Some(at) = table.updated_at {
        let stamp = format!("(updated {})\n", at.format("%Y-%m-%d %H:%M:%S UTC"));
        out.push_str(&stamp.dimmed().to_string());
    }
    out
}
