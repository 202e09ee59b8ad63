//! Plain-text rendering of cutting plans.

use std::fmt::{self, Write};

use woodcalc_core::{CuttingPlan, StockPlan};

/// Renders every plan as a text report.
pub fn render(plans: &[StockPlan], unit: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (i, stock_plan) in plans.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "== {} ==", stock_plan.stock_type.name)?;
        render_plan(&mut out, &stock_plan.plan, unit)?;
    }
    if plans.is_empty() {
        out.push_str("No pieces to cut.\n");
    }
    Ok(out)
}

fn render_plan(out: &mut impl Write, plan: &CuttingPlan, unit: &str) -> fmt::Result {
    for (i, stock) in plan.stocks.iter().enumerate() {
        writeln!(
            out,
            "Bar {} ({} {}): {} pieces, {} {} left, {:.1}% used",
            i + 1,
            stock.length,
            unit,
            stock.piece_count(),
            stock.remaining_length,
            unit,
            stock.utilization
        )?;
        for piece in &stock.pieces {
            writeln!(
                out,
                "  {:>8} @ {:<8} [{}]",
                piece.length, piece.position, piece.original_id
            )?;
        }
    }

    for group in &plan.oversized_pieces {
        let Some(first) = group.first() else { continue };
        let total: f64 = group.iter().map(|p| p.length).sum();
        writeln!(
            out,
            "Joined piece [{}] ({} {}) in {} parts:",
            first.original_id,
            total,
            unit,
            group.len()
        )?;
        for part in group.iter().filter(|p| p.is_join_part()) {
            if let Some(join) = part.join {
                writeln!(
                    out,
                    "  part {}/{}: {} from a {} bar",
                    join.part_number, join.total_parts, part.length, join.stock_length
                )?;
            }
        }
    }

    if !plan.unplaced.is_empty() {
        writeln!(out, "Unplaced: {}", plan.unplaced.join(", "))?;
    }

    let purchases: Vec<String> = plan
        .purchase_list()
        .iter()
        .map(|(length, count)| format!("{} × {} {}", count, length, unit))
        .collect();
    if !purchases.is_empty() {
        writeln!(out, "Buy: {}", purchases.join(", "))?;
    }

    writeln!(
        out,
        "Total: {} {} used, {} {} waste, {} utilization",
        plan.total_used,
        unit,
        plan.total_waste,
        unit,
        plan.utilization_percent()
    )
}
