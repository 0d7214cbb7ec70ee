use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 翻译器运行计数
#[derive(Debug, Default)]
pub struct StatsCounters {
    lookups: AtomicUsize,
    empty_inputs: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
    errors: AtomicUsize,
}

impl StatsCounters {
    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_input(&self) {
        self.empty_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// 未命中即发起一次网络请求
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, history_entries: usize) -> TranslationStats {
        TranslationStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            empty_inputs: self.empty_inputs.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            history_entries,
        }
    }
}

/// 统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    pub lookups: usize,
    pub empty_inputs: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub errors: usize,
    pub history_entries: usize,
}

impl TranslationStats {
    /// 命中率，没有有效查询时为 `None`
    pub fn cache_hit_rate(&self) -> Option<f64> {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            None
        } else {
            Some(self.cache_hits as f64 / total as f64)
        }
    }
}

/// 输出统计信息
///
/// CLI 写到 stderr，避免与 stdout 上的译文或JSON行混在一起。
pub fn write_translation_stats<W: Write>(
    out: &mut W,
    stats: &TranslationStats,
    total_duration: Duration,
) -> io::Result<()> {
    writeln!(out, "\n📊 翻译统计报告:")?;
    writeln!(out, "═══════════════════════════════════════")?;

    writeln!(out, "🔤 请求统计:")?;
    writeln!(out, "   翻译调用: {} 次", stats.lookups)?;
    writeln!(out, "   空输入: {} 次", stats.empty_inputs)?;
    writeln!(out, "   网络请求: {} 次", stats.cache_misses)?;
    writeln!(out, "   失败: {} 次", stats.errors)?;

    if let Some(rate) = stats.cache_hit_rate() {
        writeln!(out, "\n💾 缓存统计:")?;
        writeln!(out, "   缓存命中: {} 次", stats.cache_hits)?;
        writeln!(out, "   缓存未命中: {} 次", stats.cache_misses)?;
        writeln!(out, "   命中率: {:.1}%", rate * 100.0)?;
        writeln!(out, "   历史记录: {} 条", stats.history_entries)?;
    }

    writeln!(out, "\n⏱️  总耗时: {}", format_duration(total_duration))
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
