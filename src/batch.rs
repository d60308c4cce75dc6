//! Parallel work over a list with results delivered in list order
//!
//! Workers run on a rayon pool; the calling thread receives results as they
//! complete and hands each one to `emit` as soon as every earlier item has
//! been emitted. Output therefore streams in input order without waiting for
//! the whole list.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

use rayon::ThreadPool;
use rayon::prelude::*;

/// Run `work` on every item in `pool` and call `emit` for each result in
/// item order.
///
/// Stops emitting at the first error returned by `emit`. Work already handed
/// to the pool still runs, and its results are dropped.
pub fn run_in_order<T, R, W, E, X>(
    pool: &ThreadPool,
    items: &[T],
    work: W,
    mut emit: E,
) -> Result<(), X>
where
    T: Sync,
    R: Send,
    W: Fn(&T) -> R + Sync,
    E: FnMut(&T, R) -> Result<(), X>,
{
    let (tx, rx) = mpsc::channel::<(usize, R)>();
    let work = &work;

    thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                items
                    .par_iter()
                    .enumerate()
                    .for_each_with(tx, |tx, (i, item)| {
                        // The receiver is gone only after an emit error.
                        let _ = tx.send((i, work(item)));
                    })
            })
        });

        let mut pending = BTreeMap::new();
        let mut next = 0;
        for (i, result) in rx {
            pending.insert(i, result);
            while let Some(result) = pending.remove(&next) {
                emit(&items[next], result)?;
                next += 1;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rayon::ThreadPoolBuilder;

    use super::*;

    fn pool(threads: usize) -> ThreadPool {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("thread pool")
    }

    #[test]
    fn test_results_emitted_in_order() {
        let items: Vec<u64> = (0..64).collect();
        let mut seen = Vec::new();

        let result: Result<(), ()> = run_in_order(
            &pool(4),
            &items,
            |&n| {
                // Later items tend to finish first
                thread::sleep(Duration::from_micros((64 - n) * 50));
                n * n
            },
            |&n, square| {
                assert_eq!(square, n * n);
                seen.push(n);
                Ok(())
            },
        );

        assert_eq!(result, Ok(()));
        assert_eq!(seen, items);
    }

    #[test]
    fn test_single_thread_pool() {
        let items = ["a", "bb", "ccc"];
        let mut lens = Vec::new();
        let result: Result<(), ()> = run_in_order(
            &pool(1),
            &items,
            |s| s.len(),
            |_, len| {
                lens.push(len);
                Ok(())
            },
        );
        assert_eq!(result, Ok(()));
        assert_eq!(lens, vec![1, 2, 3]);
    }

    #[test]
    fn test_emit_error_stops_output() {
        let items: Vec<u32> = (0..20).collect();
        let mut emitted = 0;
        let result = run_in_order(
            &pool(3),
            &items,
            |&n| n,
            |_, n| {
                if n == 5 {
                    return Err("stop");
                }
                emitted += 1;
                Ok(())
            },
        );
        assert_eq!(result, Err("stop"));
        assert_eq!(emitted, 5);
    }

    #[test]
    fn test_empty_list() {
        let items: [u8; 0] = [];
        let result: Result<(), ()> =
            run_in_order(&pool(2), &items, |&b| b, |_, _| panic!("nothing to emit"));
        assert_eq!(result, Ok(()));
    }
}
