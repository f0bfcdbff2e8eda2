use crate::error::ReservationNotifierError;

/// Lazily groups an iterator into consecutive batches of `size` items.
///
/// Each call to `next` pulls at most `size` items from the source; only the
/// last batch may be shorter, and an exhausted source yields no empty batch.
pub struct Batches<I: Iterator> {
    source: I,
    size: usize,
}

impl<I: Iterator> Batches<I> {
    pub fn new<T>(
        records: T,
        size: usize,
    ) -> Result<Self, ReservationNotifierError>
    where
        T: IntoIterator<IntoIter = I>,
    {
        if size == 0 {
            return Err(ReservationNotifierError::configuration("batch size must be a positive integer"));
        }

        Ok(Self {
            source: records.into_iter(),
            size,
        })
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.source.by_ref().take(self.size).collect::<Vec<I::Item>>();

        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn should_keep_order_with_short_last_batch() {
        let batches = Batches::new(1..=10, 4).unwrap().collect::<Vec<_>>();

        assert_eq!(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10]], batches);
    }

    #[test]
    fn should_concatenate_back_to_input_for_any_size() {
        let records = (0..37).collect::<Vec<u32>>();

        for size in 1..=40 {
            let batches = Batches::new(records.clone(), size).unwrap().collect::<Vec<_>>();

            assert!(batches.iter().rev().skip(1).all(|batch| batch.len() == size));
            assert!(batches.last().is_some_and(|batch| !batch.is_empty() && batch.len() <= size));
            assert_eq!(records, batches.concat());
        }
    }

    #[test]
    fn should_yield_nothing_for_empty_input() {
        assert_eq!(0, Batches::new(Vec::<u32>::new(), 3).unwrap().count());
    }

    #[test]
    fn should_reject_zero_size() {
        let result = Batches::new(vec![1, 2, 3], 0);

        assert!(result.is_err_and(|error| error.is_configuration()));
    }

    #[test]
    fn should_not_read_ahead_of_the_current_batch() {
        let pulled = Cell::new(0);
        let source = (0..100).inspect(|_| pulled.set(pulled.get() + 1));

        let mut batches = Batches::new(source, 5).unwrap();
        let first = batches.next().unwrap();

        assert_eq!(vec![0, 1, 2, 3, 4], first);
        assert_eq!(5, pulled.get());
    }
}
