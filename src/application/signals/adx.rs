/// Average Directional Index with Wilder's smoothing.
///
/// The first `period` bars are summed to seed the smoothed true range and
/// directional movement; later bars use `prev - prev / n + current`.
/// Returns 0.0 until a full period has been seen.
#[derive(Debug, Clone)]
pub struct WilderAdx {
    period: usize,
    prev: Option<(f64, f64, f64)>,
    tr_smooth: f64,
    plus_dm_smooth: f64,
    minus_dm_smooth: f64,
    adx: f64,
    bars: usize,
}

impl WilderAdx {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            prev: None,
            tr_smooth: 0.0,
            plus_dm_smooth: 0.0,
            minus_dm_smooth: 0.0,
            adx: 0.0,
            bars: 0,
        }
    }

    pub fn next(&mut self, high: f64, low: f64, close: f64) -> f64 {
        let Some((prev_high, prev_low, prev_close)) = self.prev.replace((high, low, close)) else {
            return 0.0;
        };

        let true_range = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        let up_move = high - prev_high;
        let down_move = prev_low - low;
        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        self.bars += 1;
        let n = self.period as f64;

        if self.bars <= self.period {
            self.tr_smooth += true_range;
            self.plus_dm_smooth += plus_dm;
            self.minus_dm_smooth += minus_dm;
        } else {
            self.tr_smooth = self.tr_smooth - self.tr_smooth / n + true_range;
            self.plus_dm_smooth = self.plus_dm_smooth - self.plus_dm_smooth / n + plus_dm;
            self.minus_dm_smooth = self.minus_dm_smooth - self.minus_dm_smooth / n + minus_dm;
        }

        if self.bars < self.period || self.tr_smooth <= 0.0 {
            return self.adx;
        }

        let plus_di = 100.0 * self.plus_dm_smooth / self.tr_smooth;
        let minus_di = 100.0 * self.minus_dm_smooth / self.tr_smooth;
        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };

        self.adx = if self.bars == self.period {
            dx
        } else {
            (self.adx * (n - 1.0) + dx) / n
        };
        self.adx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adx_warms_up_before_reporting() {
        let mut adx = WilderAdx::new(14);
        for i in 0..14 {
            let base = 100.0 + i as f64;
            assert_eq!(adx.next(base + 1.0, base - 1.0, base), 0.0);
        }
    }

    #[test]
    fn test_steady_uptrend_has_high_adx() {
        let mut adx = WilderAdx::new(14);
        let mut value = 0.0;
        for i in 0..60 {
            let base = 100.0 + 2.0 * i as f64;
            value = adx.next(base + 1.0, base - 1.0, base + 0.5);
        }
        assert!(value > 25.0, "expected trending ADX, got {}", value);
    }

    #[test]
    fn test_flat_market_has_low_adx() {
        let mut adx = WilderAdx::new(14);
        let mut value = 0.0;
        for i in 0..60 {
            let wiggle = if i % 2 == 0 { 0.5 } else { -0.5 };
            let base = 100.0 + wiggle;
            value = adx.next(base + 1.0, base - 1.0, base);
        }
        assert!(value < 25.0, "expected ranging ADX, got {}", value);
    }
}
