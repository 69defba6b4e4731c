use comfy_table::{Attribute, Cell, Color, Table};
use popcorn_models::{MovieDetails, SearchResultItem, WatchedEntry, WatchedSummary};
use serde_json::{json, Value};

fn styled_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table.set_header(header);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn result_count_line(count: usize) -> String {
    format!("Found {} results", count)
}

pub fn results_table(items: &[SearchResultItem]) -> Table {
    let mut table = styled_table(vec![header("#"), header("Title"), header("Year"), header("IMDb ID")]);
    for (i, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.title),
            Cell::new(&item.year),
            Cell::new(&item.imdb_id),
        ]);
    }
    table
}

pub fn details_table(details: &MovieDetails) -> Table {
    let mut table = styled_table(vec![header(&details.title), Cell::new(&details.year)]);
    let rows = [
        ("Released", details.release_date.clone()),
        ("Genre", details.genre.clone()),
        ("IMDb rating", format!("⭐ {}", or_dash(details.imdb_rating))),
        ("Runtime", format!("{} min", or_dash(details.runtime_minutes))),
        ("Plot", details.plot.clone()),
        ("Starring", details.actors.clone()),
        ("Directed by", details.director.clone()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = styled_table(vec![
        header("Title"),
        header("⭐️ IMDb"),
        header("🌟 You"),
        header("⏳ Runtime"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(or_dash(entry.imdb_rating)),
            Cell::new(entry.user_rating),
            Cell::new(format!("{} min", or_dash(entry.runtime_minutes))),
        ]);
    }
    table
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies  ⭐️ {:.2}  🌟 {:.2}  ⏳ {:.0} min",
        summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime_minutes
    )
}

pub fn summary_json(summary: &WatchedSummary, entries: &[WatchedEntry]) -> Value {
    json!({
        "type": "watched",
        "summary": summary,
        "entries": entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use popcorn_models::UserRating;

    #[test]
    fn test_summary_line() {
        let summary = WatchedSummary {
            count: 2,
            avg_imdb_rating: 7.0,
            avg_user_rating: 8.0,
            avg_runtime_minutes: 110.0,
        };
        assert_eq!(summary_line(&summary), "#️⃣ 2 movies  ⭐️ 7.00  🌟 8.00  ⏳ 110 min");
    }

    #[test]
    fn test_summary_json_carries_summary_and_entries() {
        let entry = WatchedEntry {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
            imdb_rating: Some(8.8),
            runtime_minutes: Some(148),
            user_rating: UserRating::new(9).unwrap(),
            rated_at: Utc::now(),
        };
        let entries = vec![entry];
        let summary = WatchedSummary {
            count: 1,
            avg_imdb_rating: 8.8,
            avg_user_rating: 9.0,
            avg_runtime_minutes: 148.0,
        };

        let doc = summary_json(&summary, &entries);
        assert_eq!(doc["type"], "watched");
        assert_eq!(doc["summary"]["count"], 1);
        assert_eq!(doc["summary"]["avg_user_rating"], 9.0);
        assert_eq!(doc["entries"][0]["imdb_id"], "tt1375666");
        assert_eq!(doc["entries"][0]["user_rating"], 9);
    }

    #[test]
    fn test_empty_summary_line() {
        assert_eq!(
            summary_line(&WatchedSummary::default()),
            "#️⃣ 0 movies  ⭐️ 0.00  🌟 0.00  ⏳ 0 min"
        );
    }

    #[test]
    fn test_results_table_lists_every_item() {
        let items = vec![
            SearchResultItem {
                imdb_id: "tt1375666".to_string(),
                title: "Inception".to_string(),
                year: "2010".to_string(),
                poster_url: String::new(),
            },
            SearchResultItem {
                imdb_id: "tt0816692".to_string(),
                title: "Interstellar".to_string(),
                year: "2014".to_string(),
                poster_url: String::new(),
            },
        ];
        let rendered = results_table(&items).to_string();
        assert!(rendered.contains("Inception"));
        assert!(rendered.contains("tt0816692"));
        assert_eq!(result_count_line(items.len()), "Found 2 results");
    }
}
