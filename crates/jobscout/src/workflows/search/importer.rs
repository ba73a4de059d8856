use std::io::Read;

use serde::Deserialize;

use super::domain::RawJobRecord;

/// Parse a CSV export of job postings into raw records.
///
/// Expected header columns: `title,company,description,location,url,source_id`.
/// Cells are trimmed; a column absent from the file leaves the field empty
/// rather than malformed, since CSV cannot distinguish the two per row.
pub fn parse_job_records<R: Read>(reader: R) -> Result<Vec<RawJobRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<JobRow>() {
        records.push(row?.into_raw());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    source_id: String,
}

impl JobRow {
    fn into_raw(self) -> RawJobRecord {
        RawJobRecord {
            title: Some(self.title),
            company: Some(self.company),
            description: Some(self.description),
            location: Some(self.location),
            url: Some(self.url),
            source_id: Some(self.source_id),
        }
    }
}
