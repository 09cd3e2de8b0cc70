//! 時間區段顏色選擇
//!
//! 依目前秒數落在哪個 15 秒區段決定顏色，一分鐘內顏色會輪替變化

use chrono::{DateTime, Timelike, Utc};

/// 各區段對應的顏色代碼（青、藍、綠、紅）
const BUCKET_COLORS: [char; 4] = ['c', 'b', 'g', 'r'];

/// 每個區段的秒數
const BUCKET_SECONDS: u32 = 15;

/// 時間來源
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// 系統時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時間（測試用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 依秒數選擇顏色代碼
///
/// 閏秒 (60) 歸入最後一個區段
pub fn random_color_for_second(second: u32) -> char {
    let bucket = (second / BUCKET_SECONDS) as usize;
    BUCKET_COLORS[bucket.min(BUCKET_COLORS.len() - 1)]
}

/// 依目前時間選擇顏色代碼
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use mudfmt::color::{random_color, FixedClock};
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2007, 11, 1, 15, 25, 10).unwrap());
/// assert_eq!(random_color(&clock), 'c');
/// ```
pub fn random_color(clock: &dyn Clock) -> char {
    random_color_for_second(clock.now().second())
}
