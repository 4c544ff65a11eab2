//! Statement builder tour for sqlchain
//!
//! Run with: cargo run --example builder -p sqlchain

use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use sqlchain::prelude::*;

fn print_header(title: &str) {
    println!();
    println!("{}", "─".repeat(70).bright_black());
    println!("{}", title.bold().cyan());
    println!("{}", "─".repeat(70).bright_black());
}

fn statement_table(rows: &[(&str, BuiltQuery)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Statement")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
            Cell::new("SQL")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
            Cell::new("Values")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        ]);

    for (name, built) in rows {
        let values = serde_json::to_string(&built.values).unwrap_or_default();
        table.add_row(vec![
            Cell::new(name).fg(Color::Yellow),
            Cell::new(&built.sql).fg(Color::White),
            Cell::new(values).fg(Color::Magenta),
        ]);
    }

    table
}

fn main() -> Result<(), QbError> {
    // ============================================
    // SELECT
    // ============================================
    print_header("SELECT");

    let published = select(["user_id"]).from("books").where_eq("is_publish", true);
    let users = select(["users.id", "users.username"])
        .from("users")
        .left_join("profiles", where_column("profiles.user_id", "users.id"))
        .where_op("age", "<", 40)
        .where_in("users.id", published)
        .or_where_group(|g| g.where_like("username", "zhang%").where_not_null("email"))
        .order_by_desc("users.id")
        .limit_offset(0, 20);

    let stats = select(["age", "count(1)"])
        .from("users")
        .group_by(["age"])
        .having(|h| h.where_op("count(1)", ">", 10));

    let locked = select(["*"]).from("accounts").where_eq("id", 7).for_update();

    println!("{}", users.to_string().green());
    println!("{}", stats.to_string().green());
    println!("{}", locked.to_string().green());

    // ============================================
    // INSERT / UPDATE / DELETE
    // ============================================
    print_header("INSERT / UPDATE / DELETE");

    let row = BTreeMap::from([("username", Value::from("lisi")), ("age", Value::Int(20))]);
    let created = insert("users").map(row);
    let renamed = update("users").set("username", "wangwu").where_eq("id", 1);
    let purged = delete("users").where_in("id", [3, 4, 5]);

    println!("{}", created.to_string().green());
    println!("{}", renamed.to_string().green());
    println!("{}", purged.to_string().green());

    // ============================================
    // Parameterized output
    // ============================================
    print_header("Parameterized output");

    let rows = vec![
        ("select", users.build()?),
        ("select (grouped)", stats.build()?),
        ("insert", created.build()?),
        ("update", renamed.build()?),
        ("delete", purged.build()?),
    ];
    println!("{}", statement_table(&rows));

    // ============================================
    // Misuse
    // ============================================
    print_header("Misuse");

    match select(["*"]).from("users").where_op("id", "in", 1).build() {
        Ok(q) => println!("unexpected: {}", q.sql),
        Err(e) => println!("  {} {}", "✗".red().bold(), e),
    }

    Ok(())
}
