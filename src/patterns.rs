//! Static pattern tables driving classification.
//!
//! Each report variant is configured by an ordered category table; the
//! scanning engine itself is shared. Tables are plain data compiled into
//! regex form once per run, so a syntax error in a table surfaces before
//! any scanning starts.

use crate::error::AnalysisError;
use regex::Regex;

/// One category of an uncompiled table: a label and its patterns in
/// definition order. Definition order is load-bearing; it drives section
/// ordering and dedup tie-breaks.
pub struct PatternGroup {
    pub label: &'static str,
    pub patterns: &'static [&'static str],
}

// ── KPT classification (keep / problem / try) ───────────────────────

pub static KPT_PATTERNS: &[PatternGroup] = &[
    PatternGroup {
        label: "keep",
        patterns: &[
            "良い", "便利", "助かった", "成功", "改善された",
            "効率的", "快適", "使いやすい", "分かりやすい",
        ],
    },
    PatternGroup {
        label: "problem",
        patterns: &[
            "課題", "問題", "改善", "難しい", "不便",
            "時間がかかる", "複雑", "分かりにくい", "エラー",
        ],
    },
    PatternGroup {
        label: "try",
        patterns: &[
            "提案", "検討", "試してみる", "導入", "実装",
            "改善案", "新しい", "変更", "最適化",
        ],
    },
];

// ── Negative remark extraction ──────────────────────────────────────

/// Flat negative table for the detail report; a single unnamed category.
pub static NEGATIVE_PATTERNS: &[PatternGroup] = &[PatternGroup {
    label: "ネガティブ",
    patterns: &[
        "問題", "課題", "難しい", "不便", "時間がかかる",
        "複雑", "分かりにくい", "エラー", "失敗", "遅れ",
        "懸念", "リスク", "改善", "修正", "対応",
        "申し訳", "すみません", "ごめん", "すいません",
        "できない", "困る", "大変", "厳しい",
    ],
}];

pub static NEGATIVE_LIST_PATTERNS: &[PatternGroup] = &[
    PatternGroup {
        label: "技術的な問題",
        patterns: &[
            "エラー", "バグ", "不具合", "失敗", "修正",
            "対応", "できない", "起動できない", "反映されない",
        ],
    },
    PatternGroup {
        label: "プロセス上の問題",
        patterns: &[
            "課題", "改善", "時間がかかる", "遅れ", "期限",
            "スケジュール", "予定", "計画",
        ],
    },
    PatternGroup {
        label: "コミュニケーション",
        patterns: &[
            "申し訳", "すみません", "ごめん", "すいません",
            "確認", "連絡", "報告",
        ],
    },
    PatternGroup {
        label: "リスク・懸念",
        patterns: &[
            "リスク", "懸念", "問題", "影響", "不安",
            "心配", "難しい", "複雑", "大変",
        ],
    },
];

/// Summary variant carries a wider net than the list variant.
pub static NEGATIVE_SUMMARY_PATTERNS: &[PatternGroup] = &[
    PatternGroup {
        label: "技術的な問題",
        patterns: &[
            "エラー", "バグ", "不具合", "失敗", "修正",
            "対応", "できない", "起動できない", "反映されない",
            "動作しない", "クラッシュ", "タイムアウト",
        ],
    },
    PatternGroup {
        label: "プロセス上の問題",
        patterns: &[
            "課題", "改善", "時間がかかる", "遅れ", "期限",
            "スケジュール", "予定", "計画", "遅延", "延期",
            "キャンセル", "中止",
        ],
    },
    PatternGroup {
        label: "コミュニケーション",
        patterns: &[
            "申し訳", "すみません", "ごめん", "すいません",
            "確認", "連絡", "報告", "誤解", "認識違い",
            "伝わっていない", "不明確",
        ],
    },
    PatternGroup {
        label: "リスク・懸念",
        patterns: &[
            "リスク", "懸念", "問題", "影響", "不安",
            "心配", "難しい", "複雑", "大変", "危険",
            "注意", "警告",
        ],
    },
];

// ── Positive remark extraction ──────────────────────────────────────

pub static POSITIVE_LIST_PATTERNS: &[PatternGroup] = &[
    PatternGroup {
        label: "成果・達成",
        patterns: &[
            "完了", "達成", "成功", "できた", "うまくいった", "解決",
            "進捗", "リリース", "対応済み", "修正済み", "改善済み",
        ],
    },
    PatternGroup {
        label: "感謝・賞賛",
        patterns: &[
            "ありがとうございます", "感謝", "助かります", "素晴らしい",
            "すごい", "良い", "ナイス", "お疲れ様", "助かった",
            "嬉しい", "最高",
        ],
    },
    PatternGroup {
        label: "前向きな姿勢",
        patterns: &[
            "頑張ります", "やってみます", "挑戦", "前向き", "大丈夫",
            "問題ありません", "OK", "承知", "了解",
            "よろしくお願いします", "引き続き", "進めます",
        ],
    },
];

// ── Sentiment lexicon ───────────────────────────────────────────────

pub struct LexiconEntry {
    pub label: &'static str,
    pub words: &'static [&'static str],
}

pub static SENTIMENT_LEXICON: &[LexiconEntry] = &[
    LexiconEntry {
        label: "ポジティブ",
        words: &["良い", "便利", "助かった", "成功", "改善"],
    },
    LexiconEntry {
        label: "ネガティブ",
        words: &["悪い", "不便", "問題", "失敗", "課題"],
    },
];

// ── Compiled form ───────────────────────────────────────────────────

/// One pattern compiled for scanning. `index` is the position within its
/// category table, kept for stable ranking tie-breaks.
#[derive(Debug)]
pub struct CompiledPattern {
    pub label: String,
    pub regex: Regex,
    pub index: usize,
}

#[derive(Debug)]
pub struct CompiledCategory {
    pub name: String,
    pub patterns: Vec<CompiledPattern>,
}

/// An immutable, ready-to-scan pattern set: categories in definition
/// order plus the context half-width for this report variant.
#[derive(Debug)]
pub struct PatternSet {
    pub categories: Vec<CompiledCategory>,
    pub window: usize,
}

impl PatternSet {
    /// Compile a static table. Fails with `PatternCompile` on the first
    /// syntactically invalid entry, before any text is scanned.
    pub fn compile(groups: &[PatternGroup], window: usize) -> Result<PatternSet, AnalysisError> {
        let mut categories = Vec::with_capacity(groups.len());
        for group in groups {
            let mut patterns = Vec::with_capacity(group.patterns.len());
            for (index, raw) in group.patterns.iter().enumerate() {
                let regex = Regex::new(raw).map_err(|source| AnalysisError::PatternCompile {
                    category: group.label.to_string(),
                    pattern: (*raw).to_string(),
                    source,
                })?;
                patterns.push(CompiledPattern {
                    label: (*raw).to_string(),
                    regex,
                    index,
                });
            }
            categories.push(CompiledCategory {
                name: group.label.to_string(),
                patterns,
            });
        }
        Ok(PatternSet { categories, window })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tables_compile() {
        for (groups, window) in [
            (KPT_PATTERNS, 50),
            (NEGATIVE_PATTERNS, 100),
            (NEGATIVE_LIST_PATTERNS, 100),
            (NEGATIVE_SUMMARY_PATTERNS, 100),
            (POSITIVE_LIST_PATTERNS, 100),
        ] {
            let set = PatternSet::compile(groups, window).unwrap();
            assert_eq!(set.categories.len(), groups.len());
            assert_eq!(set.window, window);
        }
    }

    #[test]
    fn test_definition_order_preserved() {
        let set = PatternSet::compile(KPT_PATTERNS, 50).unwrap();
        let names: Vec<&str> = set.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["keep", "problem", "try"]);
        assert_eq!(set.categories[1].patterns[8].label, "エラー");
        assert_eq!(set.categories[1].patterns[8].index, 8);
    }

    #[test]
    fn test_compiled_set_is_debug_printable() {
        // unwrap_err in the compile-failure test needs PatternSet: Debug.
        let set = PatternSet::compile(KPT_PATTERNS, 50).unwrap();
        let dump = format!("{set:?}");
        assert!(dump.contains("keep"));
        assert!(dump.contains("window: 50"));
    }

    #[test]
    fn test_invalid_pattern_fails_compile() {
        static BROKEN: &[PatternGroup] = &[PatternGroup {
            label: "broken",
            patterns: &["valid", "(unclosed"],
        }];
        let err = PatternSet::compile(BROKEN, 50).unwrap_err();
        match err {
            crate::error::AnalysisError::PatternCompile { category, pattern, .. } => {
                assert_eq!(category, "broken");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
