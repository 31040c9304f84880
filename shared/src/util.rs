/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One day in milliseconds
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Generate a business identifier for a new entity.
///
/// Hex form (32 chars, no dashes) of a random UUID v4. Assigned once at
/// creation and never changed.
pub fn new_business_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Round `num` to `precision` decimal places, half away from zero.
///
/// Scales by 10^precision, adds `copysign(0.5, scaled)` and truncates.
/// Inputs sitting on a binary boundary (e.g. `2.005`) may round down because
/// the scaled value is already below the half point.
pub fn to_fixed(num: f64, precision: u32) -> f64 {
    let output = 10f64.powi(precision as i32);
    round(num * output) / output
}

fn round(num: f64) -> f64 {
    (num + 0.5f64.copysign(num)).trunc()
}
