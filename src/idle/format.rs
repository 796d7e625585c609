/// 表示用に桁を省略する（例: 1234 → "1.23K"）。
///
/// 小数第 2 位の端数は 0 から遠い方へ丸める（1125 → "1.13K"）。
pub fn format_amount(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_amount(-n));
    }
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SUFFIXES {
        if n >= scale {
            let v = ((n / scale) * 100.0).round() / 100.0;
            return format!("{:.2}{}", v, suffix);
        }
    }
    format!("{}", n.floor() as u64)
}
