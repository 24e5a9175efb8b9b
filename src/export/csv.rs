use super::ExportRow;

const HEADER: &str = "name;category;confidence;reply";

pub fn render_csv(rows: &[ExportRow<'_>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.to_string());
    for row in rows {
        let (category, confidence, reply) = match row.result {
            Some(result) => (
                result.category.label().to_string(),
                result.confidence.to_string(),
                flatten_newlines(&result.reply),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        let fields: [&str; 4] = [&row.item.name, &category, &confidence, &reply];
        lines.push(
            fields
                .iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(";"),
        );
    }
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
