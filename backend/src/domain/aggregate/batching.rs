//! Id partitioning and ordered batch folding.

use std::collections::HashSet;
use std::future::Future;
use std::num::NonZeroUsize;

use futures_util::FutureExt;
use futures_util::stream::{self, StreamExt};
use tracing::debug;

/// Drop repeated ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Split `ids` into consecutive batches of at most `size` ids.
pub fn partition(ids: &[i64], size: NonZeroUsize) -> impl Iterator<Item = &[i64]> {
    ids.chunks(size.get())
}

/// Run `fetch` once per batch and fold the results in batch order.
///
/// Up to `concurrency` batches are in flight at once; results are still
/// merged in the order the batches were cut, so the outcome never depends
/// on completion order. The first failing batch fails the whole fold.
pub async fn fold_batches<'ids, T, E, A, F, Fut>(
    operation: &'static str,
    ids: &'ids [i64],
    size: NonZeroUsize,
    concurrency: NonZeroUsize,
    mut fetch: F,
    init: A,
    mut merge: impl FnMut(&mut A, Vec<T>),
) -> Result<A, E>
where
    F: FnMut(&'ids [i64]) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut batches = std::pin::pin!(
        stream::iter(partition(ids, size))
            .map(|batch| {
                let batch_size = batch.len();
                fetch(batch).map(move |rows| (batch_size, rows))
            })
            .buffered(concurrency.get())
    );

    let mut acc = init;
    let mut batch_index = 0_usize;
    while let Some((batch_size, rows)) = batches.next().await {
        let rows = rows?;
        debug!(operation, batch_index, batch_size, rows = rows.len(), "batch fetched");
        merge(&mut acc, rows);
        batch_index += 1;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn size(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("non-zero size")
    }

    #[rstest]
    #[case(vec![], 3, vec![])]
    #[case(vec![1, 2, 3, 4, 5], 2, vec![vec![1, 2], vec![3, 4], vec![5]])]
    #[case(vec![1, 2, 3], 3, vec![vec![1, 2, 3]])]
    #[case(vec![1, 2], 10, vec![vec![1, 2]])]
    fn partition_cuts_consecutive_batches(
        #[case] ids: Vec<i64>,
        #[case] batch_size: usize,
        #[case] expected: Vec<Vec<i64>>,
    ) {
        let batches: Vec<Vec<i64>> = partition(&ids, size(batch_size)).map(<[i64]>::to_vec).collect();
        assert_eq!(batches, expected);
    }

    #[rstest]
    fn distinct_ids_keeps_first_occurrence() {
        assert_eq!(distinct_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[tokio::test]
    async fn fold_merges_in_batch_order(#[case] concurrency: usize) {
        let ids: Vec<i64> = (1..=7).collect();

        let merged = fold_batches(
            "test",
            &ids,
            size(2),
            size(concurrency),
            |batch| {
                let rows = batch.to_vec();
                async move { Ok::<_, String>(rows) }
            },
            Vec::new(),
            |acc: &mut Vec<i64>, rows| acc.extend(rows),
        )
        .await
        .expect("fold succeeds");

        assert_eq!(merged, ids);
    }

    #[rstest]
    #[tokio::test]
    async fn first_failing_batch_fails_the_fold() {
        let ids: Vec<i64> = (1..=6).collect();

        let result = fold_batches(
            "test",
            &ids,
            size(2),
            size(1),
            |batch| {
                let first = batch.first().copied();
                async move {
                    if first == Some(3) {
                        Err(format!("batch starting at {first:?} failed"))
                    } else {
                        Ok(vec![first])
                    }
                }
            },
            0_usize,
            |acc: &mut usize, rows: Vec<Option<i64>>| *acc += rows.len(),
        )
        .await;

        assert_eq!(result, Err("batch starting at Some(3) failed".to_owned()));
    }
}
