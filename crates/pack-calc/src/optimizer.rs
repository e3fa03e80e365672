//! 最佳包裝組合計算器
//!
//! 以總件數為狀態的有界動態規劃：
//! 先求出貨件數最少（不少於訂單數量），件數相同時求包數最少。

use pack_core::{OptimizerConfig, PackCombination, PackError, PackSizes, Result, Solution};
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::cancel::CancellationToken;

/// 動態規劃表中的一格：剛好出貨 `index` 件的最佳解
///
/// 組合以父節點連結表示：前一格為 `index - size`，
/// 各格之間共用前綴且建立後不再修改。
#[derive(Debug, Clone, Copy)]
struct Cell {
    packs: u64,
    size: u64,
}

/// 包裝組合優化器
#[derive(Debug, Clone, Default)]
pub struct PackOptimizer {
    config: OptimizerConfig,
}

impl PackOptimizer {
    /// 創建新的優化器
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 計算最佳包裝組合
    pub fn optimize(&self, order_quantity: u64, pack_sizes: &PackSizes) -> Result<Solution> {
        self.optimize_with_cancel(order_quantity, pack_sizes, None)
    }

    /// 計算最佳包裝組合（可取消）
    ///
    /// 取消信號每處理 `cancel_check_interval` 個總件數檢查一次；
    /// 取消時回傳 `PackError::Cancelled`，不回傳部分結果。
    pub fn optimize_with_cancel(
        &self,
        order_quantity: u64,
        pack_sizes: &PackSizes,
        cancel: Option<&CancellationToken>,
    ) -> Result<Solution> {
        if order_quantity == 0 {
            return Err(PackError::InvalidQuantity(0));
        }
        self.config.check_quantity(order_quantity)?;

        let max_size = pack_sizes.max();
        let overflow = || PackError::QuantityOverflow {
            quantity: order_quantity,
            max_size,
        };

        // 最佳解的超出量不會超過一個最大包裝
        let limit = order_quantity
            .checked_add(max_size)
            .and_then(|limit| usize::try_from(limit).ok())
            .ok_or_else(overflow)?;
        let table_len = limit.checked_add(1).ok_or_else(overflow)?;

        tracing::info!(
            "開始包裝計算：訂單數量 {}，規格 {:?}，上界 {}",
            order_quantity,
            pack_sizes.as_slice(),
            limit
        );
        let start_time = std::time::Instant::now();

        let interval = self.config.cancel_check_interval.max(1);
        let mut table = Self::allocate_table(table_len).ok_or_else(overflow)?;
        table[0] = Some(Cell { packs: 0, size: 0 });

        for total in 0..=limit {
            if total % interval == 0 && cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::warn!("包裝計算已取消（處理至 {} / {}）", total, limit);
                return Err(PackError::Cancelled);
            }

            let Some(current) = table[total] else {
                continue;
            };

            // 規格由小到大，超過上界後其餘規格也必然超過
            for size in pack_sizes.iter() {
                let next = total + size as usize;
                if next > limit {
                    break;
                }

                // 同一格的總件數固定為 next，因此只需比較包數；
                // 包數相同時保留先找到的組合
                let packs = current.packs + 1;
                let better = match table[next] {
                    None => true,
                    Some(existing) => packs < existing.packs,
                };
                if better {
                    table[next] = Some(Cell { packs, size });
                }
            }
        }

        let best = Self::select_best(&table, order_quantity as usize)?;
        let solution = Self::reconstruct(&table, best)?;

        tracing::info!(
            "包裝計算完成：總件數 {}，總包數 {}，超出 {}，耗時 {:?}",
            solution.total_items,
            solution.total_packs,
            solution.overshoot(order_quantity),
            start_time.elapsed()
        );

        Ok(solution)
    }

    /// 批次計算：同一組規格、多張訂單，平行處理
    ///
    /// 結果順序與輸入相同，每張訂單各自成功或失敗。
    pub fn optimize_batch(
        &self,
        order_quantities: &[u64],
        pack_sizes: &PackSizes,
        cancel: Option<&CancellationToken>,
    ) -> Vec<Result<Solution>> {
        tracing::debug!("批次包裝計算：{} 張訂單", order_quantities.len());

        order_quantities
            .par_iter()
            .map(|&quantity| self.optimize_with_cancel(quantity, pack_sizes, cancel))
            .collect()
    }

    /// 配置動態規劃表，記憶體不足或容量溢出時回傳 None
    fn allocate_table(len: usize) -> Option<Vec<Option<Cell>>> {
        let mut table = Vec::new();
        table.try_reserve_exact(len).ok()?;
        table.resize(len, None);
        Some(table)
    }

    /// 總件數等於索引，第一個不小於訂單數量的可達格子即為件數最少的解
    ///
    /// 最小規格的倍數必定落在上界內，找不到代表表格狀態錯誤。
    fn select_best(table: &[Option<Cell>], order_index: usize) -> Result<usize> {
        table
            .iter()
            .enumerate()
            .skip(order_index)
            .find(|(_, cell)| cell.is_some())
            .map(|(total, _)| total)
            .ok_or_else(|| {
                PackError::Calculation(format!("總件數 {} 以上沒有可達的組合", order_index))
            })
    }

    /// 沿父節點連結還原組合
    fn reconstruct(table: &[Option<Cell>], best: usize) -> Result<Solution> {
        let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
        let mut total = best;

        while total > 0 {
            let cell = table
                .get(total)
                .copied()
                .flatten()
                .ok_or_else(|| PackError::Calculation(format!("總件數 {} 的格子未到達", total)))?;
            let parent = usize::try_from(cell.size)
                .ok()
                .and_then(|size| total.checked_sub(size))
                .ok_or_else(|| {
                    PackError::Calculation(format!("總件數 {} 的規格 {} 無效", total, cell.size))
                })?;

            *counts.entry(cell.size).or_insert(0) += 1;
            total = parent;
        }

        Ok(Solution::from_combination(PackCombination::from_counts(counts)))
    }
}

/// 以預設配置計算最佳包裝組合
pub fn optimize(order_quantity: u64, pack_sizes: &PackSizes) -> Result<Solution> {
    PackOptimizer::default().optimize(order_quantity, pack_sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Barrier};
    use std::time::Duration;

    fn sizes(values: &[u64]) -> PackSizes {
        PackSizes::new(values.iter().copied()).unwrap()
    }

    #[rstest]
    #[case::single_small_order(&[250, 500, 1000, 2000, 5000], 1, &[(250, 1)], 250, 1)]
    #[case::exact_match(&[5, 10, 20], 20, &[(20, 1)], 20, 1)]
    #[case::multiple_combinations(&[3, 7], 10, &[(3, 1), (7, 1)], 10, 2)]
    #[case::overfill_minimal(&[6, 8], 10, &[(6, 2)], 12, 2)]
    #[case::large_order(&[23, 31, 53], 500_000, &[(23, 2), (31, 7), (53, 9429)], 500_000, 9438)]
    fn test_known_scenarios(
        #[case] pack_sizes: &[u64],
        #[case] quantity: u64,
        #[case] expected: &[(u64, u64)],
        #[case] total_items: u64,
        #[case] total_packs: u64,
    ) {
        let solution = optimize(quantity, &sizes(pack_sizes)).unwrap();

        assert_eq!(
            solution.combination,
            PackCombination::from_counts(expected.iter().copied())
        );
        assert_eq!(solution.total_items, total_items);
        assert_eq!(solution.total_packs, total_packs);
    }

    #[test]
    fn test_order_size_scenarios() {
        let pack_sizes = sizes(&[250, 500, 1000, 2000, 5000]);

        let cases = vec![
            (250, vec![(250, 1)]),
            (251, vec![(500, 1)]),
            (501, vec![(250, 1), (500, 1)]),
            (12001, vec![(250, 1), (2000, 1), (5000, 2)]),
        ];

        for (quantity, expected) in cases {
            let solution = optimize(quantity, &pack_sizes).unwrap();
            assert_eq!(
                solution.combination,
                PackCombination::from_counts(expected),
                "訂單數量 {}",
                quantity
            );
        }
    }

    #[test]
    fn test_pack_larger_than_order() {
        let solution = optimize(3, &sizes(&[100])).unwrap();

        assert_eq!(solution.combination.count_of(100), 1);
        assert_eq!(solution.total_items, 100);
        assert_eq!(solution.total_packs, 1);
    }

    #[test]
    fn test_fewer_packs_on_equal_items() {
        // 12 = 4+4+4 = 6+6，件數相同時取包數少者
        let solution = optimize(12, &sizes(&[4, 6])).unwrap();

        assert_eq!(solution.combination.count_of(6), 2);
        assert_eq!(solution.total_packs, 2);
    }

    #[test]
    fn test_duplicate_sizes_ignored() {
        let a = optimize(10, &PackSizes::new(vec![3, 7, 3, 7]).unwrap()).unwrap();
        let b = optimize(10, &sizes(&[3, 7])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let result = optimize(0, &sizes(&[5]));
        assert!(matches!(result, Err(PackError::InvalidQuantity(0))));
    }

    #[test]
    fn test_quantity_overflow_rejected() {
        let result = optimize(u64::MAX, &sizes(&[2]));
        assert!(matches!(result, Err(PackError::QuantityOverflow { .. })));
    }

    #[test]
    fn test_table_too_large_rejected() {
        // 數量本身未溢出，但表格無法配置
        let result = optimize(1 << 60, &sizes(&[1]));

        let err = result.unwrap_err();
        assert!(matches!(err, PackError::QuantityOverflow { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_select_best_without_reachable_cell() {
        let table = vec![Some(Cell { packs: 0, size: 0 }), None, None];

        assert_eq!(PackOptimizer::select_best(&table, 0).unwrap(), 0);
        assert!(matches!(
            PackOptimizer::select_best(&table, 1),
            Err(PackError::Calculation(_))
        ));
    }

    #[test]
    fn test_reconstruct_broken_link() {
        // 第 5 格指向未到達的第 2 格
        let table = vec![
            Some(Cell { packs: 0, size: 0 }),
            None,
            None,
            None,
            None,
            Some(Cell { packs: 1, size: 3 }),
        ];
        assert!(matches!(
            PackOptimizer::reconstruct(&table, 5),
            Err(PackError::Calculation(_))
        ));

        // 規格大於所在總件數
        let table = vec![Some(Cell { packs: 0, size: 0 }), Some(Cell { packs: 1, size: 4 })];
        assert!(matches!(
            PackOptimizer::reconstruct(&table, 1),
            Err(PackError::Calculation(_))
        ));
    }

    #[test]
    fn test_reconstruct_follows_links() {
        let table = vec![
            Some(Cell { packs: 0, size: 0 }),
            None,
            None,
            Some(Cell { packs: 1, size: 3 }),
            None,
            None,
            Some(Cell { packs: 2, size: 3 }),
            None,
            None,
            None,
            Some(Cell { packs: 3, size: 4 }),
        ];

        let solution = PackOptimizer::reconstruct(&table, 10).unwrap();
        assert_eq!(
            solution.combination,
            PackCombination::from_counts(vec![(3, 2), (4, 1)])
        );
        assert_eq!(solution.total_packs, 3);
    }

    #[test]
    fn test_max_order_quantity() {
        let optimizer = PackOptimizer::new(OptimizerConfig::new().with_max_order_quantity(1000));

        assert!(optimizer.optimize(1000, &sizes(&[7])).is_ok());
        let err = optimizer.optimize(1001, &sizes(&[7])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let result = PackOptimizer::default().optimize_with_cancel(
            10_000,
            &sizes(&[3, 5]),
            Some(&token),
        );
        assert!(matches!(result, Err(PackError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let token = CancellationToken::new().with_timeout(Duration::ZERO);
        let optimizer = PackOptimizer::new(OptimizerConfig::new().with_cancel_check_interval(1));

        let result = optimizer.optimize_with_cancel(50_000, &sizes(&[7, 11]), Some(&token));
        assert!(matches!(result, Err(PackError::Cancelled)));
    }

    #[test]
    fn test_cancelled_from_other_thread_while_running() {
        // 200 種規格、兩百萬件：完整計算遠比取消延遲久
        let pack_sizes = PackSizes::new(1000..1200).unwrap();
        let optimizer = PackOptimizer::new(OptimizerConfig::new().with_cancel_check_interval(1));
        let token = CancellationToken::new();
        let barrier = Arc::new(Barrier::new(2));

        let canceller = {
            let token = token.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                std::thread::sleep(Duration::from_millis(5));
                token.cancel();
            })
        };

        barrier.wait();
        let result = optimizer.optimize_with_cancel(2_000_000, &pack_sizes, Some(&token));
        canceller.join().unwrap();

        assert!(matches!(result, Err(PackError::Cancelled)));
    }

    #[test]
    fn test_uncancelled_token_completes() {
        let token = CancellationToken::new().with_timeout(Duration::from_secs(3600));

        let solution = PackOptimizer::default()
            .optimize_with_cancel(10, &sizes(&[3, 7]), Some(&token))
            .unwrap();
        assert_eq!(solution.total_items, 10);
    }

    #[test]
    fn test_deterministic() {
        let pack_sizes = sizes(&[4, 9, 13, 22]);
        let first = optimize(12_345, &pack_sizes).unwrap();
        let second = optimize(12_345, &pack_sizes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_preserves_order() {
        let pack_sizes = sizes(&[6, 8]);
        let results = PackOptimizer::default().optimize_batch(&[10, 0, 14, 1], &pack_sizes, None);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().total_items, 12);
        assert!(matches!(results[1], Err(PackError::InvalidQuantity(0))));
        assert_eq!(results[2].as_ref().unwrap().total_items, 14);
        assert_eq!(results[3].as_ref().unwrap().total_items, 6);
    }

    #[test]
    fn test_batch_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let results =
            PackOptimizer::default().optimize_batch(&[100, 200], &sizes(&[3]), Some(&token));
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(PackError::Cancelled))));
    }
}
