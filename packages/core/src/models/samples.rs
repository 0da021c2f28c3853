//! Seed notes shown in a fresh notes pane.

use super::{Note, NoteSource};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 30, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// The three starter notes: a pinned producer guide, a UI analysis linked
/// back to it, and an unlinked project idea.
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note {
            id: "1".to_string(),
            title: "AI 프로듀서 가이드".to_string(),
            content: "비개발자도 AI와 효과적으로 협업할 수 있는 방법론...".to_string(),
            tags: tags(&["AI", "프로듀서", "가이드"]),
            created_at: at(10, 0),
            updated_at: at(10, 30),
            is_pinned: true,
            is_starred: true,
            related_notes: vec!["2".to_string()],
            source: Some(NoteSource::Chat),
        },
        Note {
            id: "2".to_string(),
            title: "shadcn/ui 분석 결과".to_string(),
            content: "shadcn/ui의 2025년 최신 트렌드와 Variables & Animations...".to_string(),
            tags: tags(&["UI", "React", "Design"]),
            created_at: at(9, 30),
            updated_at: at(10, 15),
            is_pinned: false,
            is_starred: false,
            related_notes: vec!["1".to_string()],
            source: Some(NoteSource::Youtube),
        },
        Note {
            id: "3".to_string(),
            title: "프로젝트 아이디어".to_string(),
            content: "Leonardo da Vinci 2075 플랫폼 개발 계획...".to_string(),
            tags: tags(&["프로젝트", "개발", "Leonardo"]),
            created_at: at(8, 45),
            updated_at: at(10, 20),
            is_pinned: false,
            is_starred: true,
            related_notes: Vec::new(),
            source: Some(NoteSource::Manual),
        },
    ]
}
