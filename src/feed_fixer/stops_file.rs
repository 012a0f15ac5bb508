use super::csv_helpers::*;
use crate::agency_tools::AgencyTools;
use crate::error::{FeedFixerError, csv_err, io_err};
use ahash::AHashMap;
use std::path::Path;

pub struct StopsResult {
    pub stops_written: usize,
    pub names_changed: usize,
    /// stop_id -> stop_name as it came in
    pub raw_stop_names: AHashMap<String, String>,
}

pub fn fix_stops_file<A: AgencyTools + ?Sized>(
    tools: &A,
    input: &Path,
    output: &Path,
) -> Result<StopsResult, FeedFixerError> {
    let input_path = input.join("stops.txt");
    let output_path = output.join("stops.txt");

    let mut rdr = open_reader(&input_path)?;
    let headers = headers(&mut rdr, &input_path)?;

    let stop_id_idx = required_column(&headers, "stop_id", "stops.txt")?;
    let stop_name_idx = column(&headers, "stop_name");

    let mut wtr = open_writer(&output_path)?;
    wtr.write_record(&headers)
        .map_err(|e| csv_err!("stops.txt", e))?;

    let mut result = StopsResult {
        stops_written: 0,
        names_changed: 0,
        raw_stop_names: AHashMap::new(),
    };

    for record in rdr.records() {
        let record = record.map_err(|e| csv_err!("stops.txt", e))?;
        let mut fields: Vec<String> = record.iter().map(|s| s.to_owned()).collect();

        if let Some(idx) = stop_name_idx {
            let raw_name = field(&record, Some(idx));

            if !raw_name.is_empty() {
                let cleaned = tools.clean_stop_name(raw_name);

                if cleaned != raw_name {
                    result.names_changed += 1;
                }

                result.raw_stop_names.insert(
                    field(&record, Some(stop_id_idx)).to_string(),
                    raw_name.to_string(),
                );
                set_field(&mut fields, idx, cleaned);
            }
        }

        wtr.write_record(&fields)
            .map_err(|e| csv_err!("stops.txt", e))?;
        result.stops_written += 1;
    }

    wtr.flush().map_err(|e| io_err!(output_path, e))?;

    Ok(result)
}
