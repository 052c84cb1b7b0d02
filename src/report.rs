//! Report structure and rendering.
//!
//! A `Report` is an ordered list of sections built from aggregated data;
//! rendering it is a pure function that never counts, sorts or scans.
//! Section shapes mirror the fixed layouts of the generated documents.

use crate::aggregate::{self, CategorySummary};

pub struct Heading {
    pub level: usize,
    pub text: String,
}

impl Heading {
    pub fn new(level: usize, text: impl Into<String>) -> Heading {
        Heading {
            level,
            text: text.into(),
        }
    }
}

pub enum Section {
    /// Heading followed by `- label: N<unit>` rows.
    Counts {
        heading: Heading,
        rows: Vec<(String, usize)>,
        unit: &'static str,
    },
    /// Heading followed by `1.`-numbered items. `gap` inserts a blank
    /// line between heading and items.
    Numbered {
        heading: Heading,
        items: Vec<String>,
        gap: bool,
    },
    /// Heading followed by free-form lines.
    Lines {
        heading: Heading,
        lines: Vec<String>,
    },
    /// Heading followed by one sub-heading block per entry; the block
    /// body is emitted verbatim.
    Blocks {
        heading: Heading,
        blocks: Vec<(Heading, String)>,
    },
}

pub struct Report {
    pub title: String,
    pub generated_at: Option<String>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        if let Some(stamp) = &self.generated_at {
            out.push_str(&format!("生成日時: {stamp}\n\n"));
        }
        for section in &self.sections {
            render_section(&mut out, section);
        }
        out
    }
}

fn push_heading(out: &mut String, heading: &Heading) {
    out.push_str(&"#".repeat(heading.level));
    out.push(' ');
    out.push_str(&heading.text);
    out.push('\n');
}

fn render_section(out: &mut String, section: &Section) {
    match section {
        Section::Counts { heading, rows, unit } => {
            push_heading(out, heading);
            for (label, count) in rows {
                out.push_str(&format!("- {label}: {count}{unit}\n"));
            }
            out.push('\n');
        }
        Section::Numbered { heading, items, gap } => {
            push_heading(out, heading);
            if *gap {
                out.push('\n');
            }
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("{}. {item}\n", i + 1));
            }
            out.push('\n');
        }
        Section::Lines { heading, lines } => {
            push_heading(out, heading);
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        Section::Blocks { heading, blocks } => {
            push_heading(out, heading);
            for (sub, body) in blocks {
                push_heading(out, sub);
                out.push_str(body);
                out.push('\n');
            }
        }
    }
}

// ── Variant builders ────────────────────────────────────────────────

/// Number of example remarks shown per category in the summary variant.
pub const SUMMARY_EXAMPLE_CAP: usize = 5;
/// Number of ranked patterns shown per category in the summary variant.
pub const SUMMARY_PATTERN_CAP: usize = 3;
/// Number of keywords shown in the KPT report.
pub const KEYWORD_LIMIT: usize = 20;

/// Combined KPT report: sentiment, keywords, then one block per KPT
/// category with its retained contexts. Empty categories still get their
/// heading so the section skeleton is stable.
pub fn kpt_report(
    generated_at: Option<String>,
    sentiment: Vec<(String, usize)>,
    keywords: Vec<(String, usize)>,
    categories: &[CategorySummary],
) -> Report {
    let blocks = categories
        .iter()
        .map(|cat| {
            let body: String = cat
                .examples
                .iter()
                .map(|ctx| format!("- {ctx}\n"))
                .collect();
            (Heading::new(3, cat.name.to_uppercase()), body)
        })
        .collect();

    Report {
        title: "Slack履歴分析レポート".to_string(),
        generated_at,
        sections: vec![
            Section::Counts {
                heading: Heading::new(2, "感情分析"),
                rows: sentiment,
                unit: "",
            },
            Section::Counts {
                heading: Heading::new(2, "主要キーワード"),
                rows: keywords,
                unit: "回",
            },
            Section::Blocks {
                heading: Heading::new(2, "KPT分析"),
                blocks,
            },
        ],
    }
}

/// Negative detail report: ranked pattern trend plus one block per
/// retained remark. `details` pairs each fired pattern with its context,
/// in discovery order.
pub fn negative_detail_report(
    generated_at: Option<String>,
    trend: Vec<(String, usize)>,
    details: &[(String, String)],
) -> Report {
    let blocks = details
        .iter()
        .map(|(pattern, context)| (Heading::new(3, pattern.clone()), format!("{context}\n")))
        .collect();

    Report {
        title: "ネガティブ発言分析レポート".to_string(),
        generated_at,
        sections: vec![
            Section::Counts {
                heading: Heading::new(2, "ネガティブ表現の傾向"),
                rows: trend,
                unit: "回",
            },
            Section::Blocks {
                heading: Heading::new(2, "ネガティブ発言の詳細"),
                blocks,
            },
        ],
    }
}

/// Negative summary: overall count, then per non-empty category the
/// remark count, the first few remarks and the most frequent patterns.
pub fn negative_summary_report(
    generated_at: Option<String>,
    summaries: &[CategorySummary],
) -> Report {
    let total = aggregate::grand_total(summaries);
    let mut sections = vec![Section::Lines {
        heading: Heading::new(2, "全体の概要"),
        lines: vec![format!("総ネガティブ発言数: {total}件")],
    }];

    for cat in summaries.iter().filter(|c| !c.is_empty()) {
        sections.push(Section::Lines {
            heading: Heading::new(2, cat.name.clone()),
            lines: vec![format!("発言数: {}件", cat.total)],
        });
        sections.push(Section::Numbered {
            heading: Heading::new(3, "主要な発言"),
            items: cat
                .examples
                .iter()
                .take(SUMMARY_EXAMPLE_CAP)
                .cloned()
                .collect(),
            gap: false,
        });
        sections.push(Section::Counts {
            heading: Heading::new(3, "頻出パターン"),
            rows: cat
                .pattern_counts
                .iter()
                .take(SUMMARY_PATTERN_CAP)
                .cloned()
                .collect(),
            unit: "回",
        });
    }

    Report {
        title: "ネガティブ発言の要約".to_string(),
        generated_at,
        sections,
    }
}

/// Remark list (positive or negative): per non-empty category a numbered
/// list of every retained context.
pub fn remark_list_report(
    title: &str,
    generated_at: Option<String>,
    summaries: &[CategorySummary],
) -> Report {
    let sections = summaries
        .iter()
        .filter(|cat| !cat.is_empty())
        .map(|cat| Section::Numbered {
            heading: Heading::new(2, cat.name.clone()),
            items: cat.examples.clone(),
            gap: true,
        })
        .collect();

    Report {
        title: title.to_string(),
        generated_at,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, examples: &[&str], counts: &[(&str, usize)]) -> CategorySummary {
        CategorySummary {
            name: name.to_string(),
            total: examples.len(),
            examples: examples.iter().map(|s| s.to_string()).collect(),
            pattern_counts: counts.iter().map(|(p, n)| (p.to_string(), *n)).collect(),
        }
    }

    #[test]
    fn test_kpt_layout() {
        let report = kpt_report(
            None,
            vec![("ポジティブ".to_string(), 2), ("ネガティブ".to_string(), 1)],
            vec![("提案".to_string(), 3)],
            &[
                summary("keep", &["良い流れでした"], &[("良い", 1)]),
                summary("problem", &[], &[]),
                summary("try", &["新しい案を検討"], &[("検討", 1)]),
            ],
        );
        let text = report.render();
        assert!(text.starts_with("# Slack履歴分析レポート\n\n## 感情分析\n- ポジティブ: 2\n"));
        assert!(text.contains("## 主要キーワード\n- 提案: 3回\n"));
        assert!(text.contains("## KPT分析\n### KEEP\n- 良い流れでした\n"));
        // Empty category keeps its heading with no bullets.
        assert!(text.contains("### PROBLEM\n\n### TRY\n"));
    }

    #[test]
    fn test_generated_at_rendered_once_in_header() {
        let report = remark_list_report(
            "ポジティブ発言リスト",
            Some("2026-08-27 10:00:00".to_string()),
            &[summary("感謝・賞賛", &["ありがとうございます"], &[])],
        );
        let text = report.render();
        assert!(text.starts_with(
            "# ポジティブ発言リスト\n\n生成日時: 2026-08-27 10:00:00\n\n"
        ));
        assert_eq!(text.matches("生成日時").count(), 1);
    }

    #[test]
    fn test_detail_report_blocks() {
        let report = negative_detail_report(
            None,
            vec![("エラー".to_string(), 2), ("失敗".to_string(), 1)],
            &[
                ("エラー".to_string(), "エラーが発生".to_string()),
                ("失敗".to_string(), "失敗しました".to_string()),
            ],
        );
        let text = report.render();
        assert!(text.contains("## ネガティブ表現の傾向\n- エラー: 2回\n- 失敗: 1回\n"));
        assert!(text.contains("## ネガティブ発言の詳細\n### エラー\nエラーが発生\n\n### 失敗\n失敗しました\n"));
    }

    #[test]
    fn test_summary_caps_and_skips_empty() {
        let examples: Vec<String> = (0..7).map(|i| format!("発言{i}")).collect();
        let example_refs: Vec<&str> = examples.iter().map(|s| s.as_str()).collect();
        let report = negative_summary_report(
            None,
            &[
                summary(
                    "技術的な問題",
                    &example_refs,
                    &[("エラー", 4), ("バグ", 2), ("失敗", 1), ("修正", 1)],
                ),
                summary("コミュニケーション", &[], &[]),
            ],
        );
        let text = report.render();
        assert!(text.contains("総ネガティブ発言数: 7件"));
        assert!(text.contains("5. 発言4\n"));
        assert!(!text.contains("6. 発言5"));
        // Pattern table capped at three rows.
        assert!(text.contains("- 失敗: 1回"));
        assert!(!text.contains("- 修正: 1回"));
        assert!(!text.contains("コミュニケーション"));
    }

    #[test]
    fn test_list_report_numbering_and_gap() {
        let report = remark_list_report(
            "ネガティブ発言リスト",
            None,
            &[summary("リスク・懸念", &["懸念があります", "リスクが高い"], &[])],
        );
        let text = report.render();
        assert!(text.contains("## リスク・懸念\n\n1. 懸念があります\n2. リスクが高い\n"));
    }

    #[test]
    fn test_empty_input_keeps_skeleton() {
        let report = kpt_report(
            None,
            vec![("ポジティブ".to_string(), 0), ("ネガティブ".to_string(), 0)],
            vec![],
            &[
                summary("keep", &[], &[]),
                summary("problem", &[], &[]),
                summary("try", &[], &[]),
            ],
        );
        let text = report.render();
        for heading in ["## 感情分析", "## 主要キーワード", "## KPT分析", "### KEEP", "### PROBLEM", "### TRY"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("- ポジティブ: 0\n"));
    }
}
