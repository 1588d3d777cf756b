use std::{fmt, path::Path, sync::Arc};

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use strum::{Display, EnumIter};
use strum_macros::EnumString;

use crate::commons::{error::ExportError, post_record::PostRecord};

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn render(&self, records: &[PostRecord]) -> Result<String, ExportError> {
        return match self {
            ExportFormat::Csv => to_csv(records),
            ExportFormat::Json => to_json(records),
        };
    }

    pub fn decode(&self, payload: &str) -> Result<Vec<PostRecord>, ExportError> {
        return match self {
            ExportFormat::Csv => from_csv(payload),
            ExportFormat::Json => from_json(payload),
        };
    }

    pub fn file_name(&self, query: &str, start_date: NaiveDate, end_date: NaiveDate) -> String {
        return match self {
            ExportFormat::Csv => format!("{}_{}_{}.csv", file_stem(query), start_date, end_date),
            ExportFormat::Json => String::from("scraped_data.json"),
        };
    }

    pub fn mime(&self) -> &'static str {
        return match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        };
    }
}

/// Query text made safe for a single path component.
fn file_stem(query: &str) -> String {
    let stem: String = query
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_matches('.');
    if stem.is_empty() {
        return String::from("query");
    }
    return stem.to_string();
}

pub fn to_csv(records: &[PostRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(PostRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|err| ExportError::Io(err.into_error()))?;
    return String::from_utf8(bytes)
        .map_err(|err| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)));
}

pub fn from_csv(payload: &str) -> Result<Vec<PostRecord>, ExportError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(payload.as_bytes());
    let records = reader.deserialize().collect::<Result<Vec<PostRecord>, csv::Error>>()?;
    return Ok(records);
}

/// Pretty-printed JSON array, four-space indent.
pub fn to_json(records: &[PostRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    return String::from_utf8(buffer)
        .map_err(|err| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)));
}

pub fn from_json(payload: &str) -> Result<Vec<PostRecord>, ExportError> {
    return Ok(serde_json::from_str(payload)?);
}

/// Writes `payload` to `target`. A directory target gets `file_name` appended.
pub async fn write_export(target: &Path, file_name: &str, payload: &str) -> Result<std::path::PathBuf, ExportError> {
    let path = if tokio::fs::metadata(target).await.map(|m| m.is_dir()).unwrap_or(false) {
        target.join(file_name)
    } else {
        target.to_path_buf()
    };
    tokio::fs::write(&path, payload).await?;
    info!("export written to {}", path.display());
    return Ok(path);
}

/// Tabular view: the ten columns and one row per post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: [&'static str; 10],
    pub rows: Vec<[String; 10]>,
}

impl Table {
    pub fn new(records: &[PostRecord]) -> Table {
        return Table {
            columns: PostRecord::COLUMNS,
            rows: records.iter().map(PostRecord::to_row).collect(),
        };
    }

    pub fn head(&self, limit: usize) -> Table {
        return Table {
            columns: self.columns,
            rows: self.rows.iter().take(limit).cloned().collect(),
        };
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|cell| cell.replace(['\t', '\n'], " ")).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        return Ok(());
    }
}

/// Memoizes renders per record sequence, keyed by the sequence's identity.
#[derive(Default)]
pub struct ExportCache {
    entries: Vec<(Arc<[PostRecord]>, ExportFormat, Arc<str>)>,
}

impl ExportCache {
    pub fn render(&mut self, records: &Arc<[PostRecord]>, format: ExportFormat) -> Result<Arc<str>, ExportError> {
        if let Some((_, _, payload)) = self
            .entries
            .iter()
            .find(|(cached, cached_format, _)| Arc::ptr_eq(cached, records) && *cached_format == format)
        {
            debug!("{} export served from cache", format);
            return Ok(payload.clone());
        }
        let payload: Arc<str> = Arc::from(format.render(records)?);
        self.entries.push((records.clone(), format, payload.clone()));
        return Ok(payload);
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::commons::testing::raw_post;

    fn records(n: u64) -> Vec<PostRecord> {
        return (1..=n).map(|id| PostRecord::from(raw_post(id))).collect();
    }

    #[test]
    fn both_encodings_round_trip_all_fields() {
        let input = records(6);
        for format in ExportFormat::iter() {
            let payload = format.render(&input).unwrap();
            assert_eq!(format.decode(&payload).unwrap(), input, "{} round trip", format);
        }
    }

    #[test]
    fn csv_and_json_agree_field_for_field() {
        let input = records(3);
        let from_csv = from_csv(&to_csv(&input).unwrap()).unwrap();
        let from_json = from_json(&to_json(&input).unwrap()).unwrap();
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn csv_has_header_even_when_empty() {
        let payload = to_csv(&[]).unwrap();
        assert_eq!(
            payload,
            "date,id,url,content,user,reply_count,retweet_count,language,source,like_count\n"
        );
        assert!(from_csv(&payload).unwrap().is_empty());
    }

    #[test]
    fn json_uses_four_space_indent() {
        let payload = to_json(&records(1)).unwrap();
        assert!(payload.starts_with("[\n    {\n        \"date\": "));
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn file_names_follow_format() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(ExportFormat::Csv.file_name("Coimbatore", start, end), "Coimbatore_2023-01-01_2023-01-31.csv");
        assert_eq!(ExportFormat::Json.file_name("Coimbatore", start, end), "scraped_data.json");
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::Csv.mime(), "text/csv");
    }

    #[test]
    fn csv_file_name_is_one_path_component() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(
            ExportFormat::Csv.file_name("url:example.com/news", start, end),
            "url_example.com_news_2023-01-01_2023-01-31.csv"
        );
        assert_eq!(
            ExportFormat::Csv.file_name("#chennai OR \"kovai\"", start, end),
            "#chennai OR _kovai__2023-01-01_2023-01-31.csv"
        );
        assert_eq!(ExportFormat::Csv.file_name("..", start, end), "query_2023-01-01_2023-01-31.csv");
    }

    #[tokio::test]
    async fn query_with_separators_exports_into_directory() {
        let dir = std::env::temp_dir().join(format!("tweet-harvest-slash-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();

        let name = ExportFormat::Csv.file_name("url:example.com/news", start, end);
        let path = write_export(&dir, &name, "x").await.unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "x");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn table_has_one_row_per_record() {
        let table = Table::new(&records(4));
        assert_eq!(table.columns, PostRecord::COLUMNS);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[2][1], "3");
        assert_eq!(table.head(2).rows.len(), 2);

        let rendered = table.to_string();
        assert_eq!(rendered.lines().count(), 5);
        assert!(rendered.starts_with("date\tid\turl"));
    }

    #[test]
    fn cache_is_keyed_by_sequence_identity() {
        let mut cache = ExportCache::default();
        let first: Arc<[PostRecord]> = Arc::from(records(2));
        let same_content: Arc<[PostRecord]> = Arc::from(records(2));

        let a = cache.render(&first, ExportFormat::Json).unwrap();
        let b = cache.render(&first, ExportFormat::Json).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.render(&first, ExportFormat::Csv).unwrap();
        let c = cache.render(&same_content, ExportFormat::Json).unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(a, c);
    }

    #[tokio::test]
    async fn directory_target_gets_default_file_name() {
        let dir = std::env::temp_dir().join(format!("tweet-harvest-export-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let path = write_export(&dir, "scraped_data.json", "[]").await.unwrap();
        assert_eq!(path, dir.join("scraped_data.json"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "[]");

        let explicit = dir.join("run.json");
        assert_eq!(write_export(&explicit, "ignored.json", "[]").await.unwrap(), explicit);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
