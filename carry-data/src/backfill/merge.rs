use crate::series::{Page, Record, SeriesTable, TimeWindow};

/// Merge backfilled [`Page`]s into a [`SeriesTable`] covering exactly `window`.
///
/// Concatenates every page in the order given, sorts by timestamp (stable, so the
/// first-seen record wins amongst equal timestamps), drops duplicate timestamps and trims
/// to `[start, end]` inclusive. Consecutive backward windows may overlap by one page
/// boundary, which is where duplicates come from.
pub fn merge<Pages>(pages: Pages, window: TimeWindow) -> SeriesTable
where
    Pages: IntoIterator<Item = Page>,
{
    let mut records = pages
        .into_iter()
        .flatten()
        .filter(|record| window.contains(record.time))
        .collect::<Vec<Record>>();

    records.sort_by_key(|record| record.time);
    records.dedup_by_key(|record| record.time);

    SeriesTable::from_sorted_unique(window, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        series::FIELD_CLOSE,
        test_utils::{candle, time},
    };
    use itertools::Itertools;

    #[test]
    fn test_merge() {
        struct TestCase {
            pages: Vec<Page>,
            window: TimeWindow,
            expected: Vec<Record>,
        }

        let tests = vec![
            TestCase {
                // TC0: no pages yields explicitly empty table
                pages: vec![],
                window: TimeWindow::new(time(0), time(10)).unwrap(),
                expected: vec![],
            },
            TestCase {
                // TC1: newest-first pages are sorted ascending
                pages: vec![
                    Page(vec![candle(5, 5.0), candle(4, 4.0)]),
                    Page(vec![candle(3, 3.0), candle(2, 2.0)]),
                ],
                window: TimeWindow::new(time(0), time(10)).unwrap(),
                expected: vec![
                    candle(2, 2.0),
                    candle(3, 3.0),
                    candle(4, 4.0),
                    candle(5, 5.0),
                ],
            },
            TestCase {
                // TC2: overlapping page boundary keeps the first-seen duplicate
                pages: vec![
                    Page(vec![candle(4, 4.0), candle(3, 3.0)]),
                    Page(vec![candle(3, 30.0), candle(2, 2.0)]),
                ],
                window: TimeWindow::new(time(0), time(10)).unwrap(),
                expected: vec![candle(2, 2.0), candle(3, 3.0), candle(4, 4.0)],
            },
            TestCase {
                // TC3: records outside the window are trimmed, bounds inclusive
                pages: vec![Page(vec![
                    candle(0, 0.0),
                    candle(1, 1.0),
                    candle(2, 2.0),
                    candle(3, 3.0),
                    candle(4, 4.0),
                ])],
                window: TimeWindow::new(time(1), time(3)).unwrap(),
                expected: vec![candle(1, 1.0), candle(2, 2.0), candle(3, 3.0)],
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = merge(test.pages, test.window);
            assert_eq!(actual.records(), test.expected.as_slice(), "TC{} failed", index);
            assert_eq!(actual.window(), test.window, "TC{} failed", index);
        }
    }

    #[test]
    fn test_merge_output_is_strictly_increasing_and_inside_window() {
        let window = TimeWindow::new(time(3), time(17)).unwrap();
        let pages = (0..5).map(|page| {
            (0..8)
                .map(|offset| candle(page * 4 + offset, offset as f64))
                .collect::<Page>()
        });

        let table = merge(pages, window);

        assert_eq!(table.len(), 15);
        assert!(table.times().tuple_windows().all(|(a, b)| a < b));
        assert!(table.times().all(|time| window.contains(time)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let window = TimeWindow::new(time(0), time(6)).unwrap();
        let table = merge(
            vec![
                Page(vec![candle(6, 6.0), candle(5, 5.0), candle(4, 4.0)]),
                Page(vec![candle(4, 40.0), candle(1, 1.0)]),
            ],
            window,
        );

        let page = Page(table.records().to_vec());
        let remerged = merge(vec![page.clone(), page], window);

        assert_eq!(remerged, table);
        assert_eq!(
            remerged.column(FIELD_CLOSE).map(|(_, close)| close).collect::<Vec<_>>(),
            vec![1.0, 4.0, 5.0, 6.0]
        );
    }
}
