//! Channel table reconstruction
//!
//! Second stage of the pipeline: the signal page is an implicit grid, not
//! explicit markup, so the flattened token stream has to be cut apart by a
//! repeating sentinel row and re-shaped into per-channel stats.
//!
//! The page carries three tables that each open with a "Channel ID" row:
//! downstream signal data, upstream signal data, and trailing codeword
//! statistics. Policies only consume the downstream grid; the upstream
//! tokens are passed through untouched and the trailing table is discarded.

use crate::types::{ChannelStats, ChannelTable, ProbeError, Result, SignalTables};

/// Row label that opens each channel table on the signal page
pub const CHANNEL_ID_SENTINEL: &str = "Channel ID";

/// Split `tokens` at the last occurrence of `sentinel`: everything before
/// it, and the sentinel plus everything after it.
///
/// Fails with [`ProbeError::Structure`] when the sentinel is absent, which
/// is how a page with an unexpected layout surfaces.
pub fn split_at_last<'a>(
    tokens: &'a [String],
    sentinel: &str,
) -> Result<(&'a [String], &'a [String])> {
    let index = tokens
        .iter()
        .rposition(|token| token == sentinel)
        .ok_or_else(|| {
            ProbeError::Structure(format!("sentinel {:?} not found on page", sentinel))
        })?;
    Ok(tokens.split_at(index))
}

/// Reconstruct the downstream channel table from the flattened token stream.
///
/// The trailing codeword table (from the last sentinel onward) is discarded,
/// the remainder is split into downstream/upstream at the next-to-last
/// sentinel, and the downstream run is walked as a dense grid of
/// `num_channels + 1` cells per row: a header row of channel ids, then one
/// row per metric holding the metric name and one value per channel.
pub fn parse_signal_tables(tokens: &[String], num_channels: usize) -> Result<SignalTables> {
    let (keep, trailing) = split_at_last(tokens, CHANNEL_ID_SENTINEL)?;
    log::debug!(
        "Discarding {} trailing tokens after last {:?} row",
        trailing.len(),
        CHANNEL_ID_SENTINEL
    );

    let (downstream, upstream) = split_at_last(keep, CHANNEL_ID_SENTINEL)?;
    log::debug!(
        "Split page into {} downstream and {} upstream tokens",
        downstream.len(),
        upstream.len()
    );

    Ok(SignalTables {
        downstream: parse_channel_grid(downstream, num_channels)?,
        upstream: upstream.to_vec(),
    })
}

/// Walk the downstream grid column by column.
///
/// Column 0 of every row is a label: the header row's remaining cells are
/// the channel ids, each stat row's remaining cells are that metric's value
/// per channel. The walk stops before the last partial row so a truncated
/// page cannot push it out of bounds.
fn parse_channel_grid(downstream: &[String], num_channels: usize) -> Result<ChannelTable> {
    let stride = num_channels + 1;
    if downstream.len() < stride {
        return Err(ProbeError::Structure(format!(
            "expected a header row of {} cells, found {} tokens",
            stride,
            downstream.len()
        )));
    }

    let mut table = ChannelTable::new();
    for column in 1..=num_channels {
        let mut stats = ChannelStats::new();
        let mut row = stride;
        while row + num_channels < downstream.len() {
            stats.insert(downstream[row].clone(), downstream[row + column].clone());
            row += stride;
        }
        table.push(downstream[column].clone(), stats);
    }

    log::debug!("Reconstructed {} downstream channels", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    /// Token stream of a well-formed 4-channel signal page: downstream grid,
    /// upstream grid, then the trailing codeword table.
    fn four_channel_tokens() -> Vec<String> {
        toks(&[
            "Channel ID", "1", "2", "3", "4",
            "Frequency", "555000000 Hz", "561000000 Hz", "567000000 Hz", "573000000 Hz",
            "Signal to Noise Ratio", "38 dB", "37 dB", "38 dB", "36 dB",
            "Power Level", "5 dBmV", "4 dBmV", "6 dBmV", "3 dBmV",
            // Upstream table
            "Channel ID", "1", "2", "3", "4",
            "Power Level", "43 dBmV", "44 dBmV", "43 dBmV", "45 dBmV",
            // Trailing codeword statistics
            "Channel ID", "1", "2", "3", "4",
            "Total Unerrored Codewords", "100", "100", "100", "100",
        ])
    }

    #[test]
    fn test_split_at_last() {
        let tokens = toks(&["a", "X", "b", "X", "c"]);
        let (before, after) = split_at_last(&tokens, "X").unwrap();
        assert_eq!(before, &tokens[..3]);
        assert_eq!(after, &tokens[3..]);
    }

    #[test]
    fn test_split_at_last_missing_sentinel() {
        let tokens = toks(&["a", "b"]);
        let result = split_at_last(&tokens, "X");
        assert!(matches!(result, Err(ProbeError::Structure(_))));
    }

    #[test]
    fn test_recovers_all_four_channels() {
        let tables = parse_signal_tables(&four_channel_tokens(), 4).unwrap();
        assert_eq!(tables.downstream.len(), 4);

        let ids: Vec<&str> = tables.downstream.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        for (id, stats) in tables.downstream.iter() {
            assert!(
                stats.get("Power Level").is_some_and(|v| !v.is_empty()),
                "channel {} missing Power Level",
                id
            );
            assert!(
                stats
                    .get("Signal to Noise Ratio")
                    .is_some_and(|v| !v.is_empty()),
                "channel {} missing Signal to Noise Ratio",
                id
            );
        }
    }

    #[test]
    fn test_values_land_in_the_right_column() {
        let tables = parse_signal_tables(&four_channel_tokens(), 4).unwrap();
        let chan2 = tables.downstream.get("2").unwrap();
        assert_eq!(chan2.get("Signal to Noise Ratio"), Some("37 dB"));
        assert_eq!(chan2.get("Power Level"), Some("4 dBmV"));
        assert_eq!(chan2.get("Frequency"), Some("561000000 Hz"));
    }

    #[test]
    fn test_upstream_retained_from_sentinel() {
        let tables = parse_signal_tables(&four_channel_tokens(), 4).unwrap();
        assert_eq!(tables.upstream.first().map(String::as_str), Some("Channel ID"));
        assert_eq!(tables.upstream.len(), 10);
        // The trailing codeword table is not part of upstream
        assert!(!tables
            .upstream
            .iter()
            .any(|t| t == "Total Unerrored Codewords"));
    }

    #[test]
    fn test_no_sentinel_is_structure_error() {
        let tokens = toks(&["Frequency", "555000000 Hz"]);
        let result = parse_signal_tables(&tokens, 4);
        assert!(matches!(result, Err(ProbeError::Structure(_))));
    }

    #[test]
    fn test_single_sentinel_is_structure_error() {
        // One sentinel only marks the trailing cut; there is nothing left to
        // split into downstream/upstream.
        let tokens = toks(&["Channel ID", "1", "2", "3", "4"]);
        let result = parse_signal_tables(&tokens, 4);
        assert!(matches!(result, Err(ProbeError::Structure(_))));
    }

    #[test]
    fn test_too_few_header_columns_is_structure_error() {
        let tokens = toks(&[
            "Channel ID", "1", "2",
            "Channel ID", "1", "2",
            "Channel ID", "1", "2",
        ]);
        let result = parse_signal_tables(&tokens, 4);
        assert!(matches!(result, Err(ProbeError::Structure(_))));
    }

    #[test]
    fn test_partial_last_row_is_not_read() {
        let tokens = toks(&[
            "Channel ID", "1", "2", "3", "4",
            "Signal to Noise Ratio", "38 dB", "37 dB", "38 dB", "36 dB",
            "Power Level", "5 dBmV", "4 dBmV", "6 dBmV", "3 dBmV",
            // Truncated stat row, two values short
            "Uncorrectable Codewords", "12", "9",
            "Channel ID", "1", "2", "3", "4",
            "Channel ID",
        ]);
        let tables = parse_signal_tables(&tokens, 4).unwrap();
        assert_eq!(tables.downstream.len(), 4);
        let chan4 = tables.downstream.get("4").unwrap();
        assert_eq!(chan4.get("Power Level"), Some("3 dBmV"));
        // The truncated row never makes it into the stats
        assert_eq!(chan4.len(), 2);
        assert!(chan4.get("Uncorrectable Codewords").is_none());
    }
}
