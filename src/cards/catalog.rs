//! Rider-Waite card names and short meanings, indexed like the deck faces.

use serde::Serialize;

/// Display name and short meaning of one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardInfo {
    pub name: &'static str,
    pub meaning: &'static str,
}

const UNKNOWN: CardInfo = CardInfo { name: "?", meaning: "?" };

macro_rules! cards {
    ($(($name:expr, $meaning:expr)),* $(,)?) => {
        [$(CardInfo { name: $name, meaning: $meaning }),*]
    };
}

/// Majors 0-21, then Wands 22-35, Cups 36-49, Swords 50-63, Pentacles 64-77
static CARDS: [CardInfo; 78] = cards![
    ("더 풀", "새로운 시작, 자유로운 선택"),
    ("매지션", "의지력, 창조적 에너지"),
    ("여사제", "직관, 내면의 지혜"),
    ("여황제", "풍요, 사랑, 풍성함"),
    ("황제", "안정, 권위, 구조"),
    ("교황", "전통, 지혜, 가르침"),
    ("연인", "사랑, 선택, 조화"),
    ("전차", "결단, 승리, 의지"),
    ("힘", "용기, 인내, 내적 힘"),
    ("은둔자", "성찰, 지혜, 고독"),
    ("운명의 수레바퀴", "순환, 변화, 기회"),
    ("정의", "공정함, 균형, 진실"),
    ("매달린 사람", "포기, 새로운 시각"),
    ("죽음", "변화, 종말과 새로운 시작"),
    ("절제", "조화, 인내, 균형"),
    ("악마", "유혹, 집착, 해방"),
    ("탑", "파괴, 깨달음, 급격한 변화"),
    ("별", "희망, 영감, 치유"),
    ("달", "직관, 불안, 잠재의식"),
    ("태양", "행복, 성공, 낙관"),
    ("심판", "부활, 깨달음, 새로운 단계"),
    ("월드", "완성, 성취, 통합"),
    ("완드 에이스", "새로운 도전, 영감"),
    ("완드 2", "계획, 결정 고민"),
    ("완드 3", "확장, 협력, 미래"),
    ("완드 4", "축하, 안정, 휴식"),
    ("완드 5", "경쟁, 갈등, 도전"),
    ("완드 6", "승리, 인정, 자신감"),
    ("완드 7", "방어, 인내, 극복"),
    ("완드 8", "신속함, 움직임, 변화"),
    ("완드 9", "근본적인 두려움"),
    ("완드 10", "부담, 책임, 완수"),
    ("완드 페이지", "탐구, 호기심, 소식"),
    ("완드 나이트", "에너지, 모험, 변화"),
    ("완드 퀸", "리더십, 독립, 자신감"),
    ("완드 킹", "비전, 기업가 정신"),
    ("컵 에이스", "새로운 사랑, 감정의 시작"),
    ("컵 2", "파트너십, 조화"),
    ("컵 3", "축하, 우정, 기쁨"),
    ("컵 4", "성찰, 불만, 선택"),
    ("컵 5", "상실, 슬픔, 극복"),
    ("컵 6", "추억, 과거, 순수함"),
    ("컵 7", "선택, 환상, 꿈"),
    ("컵 8", "이동, 변화, 새로운 길"),
    ("컵 9", "만족, 풍요, 행복"),
    ("컵 10", "가족, 조화, 완성"),
    ("컵 페이지", "창의성, 직관, 소식"),
    ("컵 나이트", "로맨스, 초대, 감정"),
    ("컵 퀸", "공감, 치유, 감성"),
    ("컵 킹", "감정적 균형, 지도력"),
    ("소드 에이스", "깨달음, 진실, 돌파"),
    ("소드 2", "결정 불가, 교착"),
    ("소드 3", "슬픔, 상처, 회복"),
    ("소드 4", "휴식, 회복, 침묵"),
    ("소드 5", "갈등, 승리와 패배"),
    ("소드 6", "이동, 변화, 극복"),
    ("소드 7", "전략, 회피, 교활함"),
    ("소드 8", "제한, 포위, 인내"),
    ("소드 9", "불안, 두려움, 고민"),
    ("소드 10", "종말, 새로운 시작"),
    ("소드 페이지", "새로운 아이디어, 호기심"),
    ("소드 나이트", "행동, 돌진, 변화"),
    ("소드 퀸", "독립, 명확함, 판단"),
    ("소드 킹", "권위, 진실, 결단"),
    ("펜타클 에이스", "재물의 시작, 기회"),
    ("펜타클 2", "균형, 협상, 선택"),
    ("펜타클 3", "협력, 숙련, 성장"),
    ("펜타클 4", "안정, 저장, 보안"),
    ("펜타클 5", "금전적 어려움, 공유"),
    ("펜타클 6", "나눔, 협력, 지원"),
    ("펜타클 7", "인내, 투자, 장기"),
    ("펜타클 8", "숙련, 노동, 성과"),
    ("펜타클 9", "풍요, 안정, 성취"),
    ("펜타클 10", "부, 유산, 완성"),
    ("펜타클 페이지", "학습, 연구, 잠재력"),
    ("펜타클 나이트", "근면, 신뢰, 진전"),
    ("펜타클 퀸", "풍요, 안정, 돌봄"),
    ("펜타클 킹", "부, 리더십, 안정"),
];

pub struct CardCatalog;

impl CardCatalog {
    pub const LEN: usize = 78;

    /// Card info for `index`; `?` placeholders when out of range
    pub fn info(index: usize) -> CardInfo {
        CARDS.get(index).copied().unwrap_or(UNKNOWN)
    }

    /// Short meaning cut to `max_chars` characters plus an ellipsis
    pub fn short_meaning(index: usize, max_chars: usize) -> String {
        truncate_chars(Self::info(index).meaning, max_chars)
    }
}

/// Keep the first `max_chars` characters, appending `…` when anything was cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_boundaries() {
        assert_eq!(CardCatalog::info(0).name, "더 풀");
        assert_eq!(CardCatalog::info(21).name, "월드");
        assert_eq!(CardCatalog::info(22).name, "완드 에이스");
        assert_eq!(CardCatalog::info(36).name, "컵 에이스");
        assert_eq!(CardCatalog::info(50).name, "소드 에이스");
        assert_eq!(CardCatalog::info(77).name, "펜타클 킹");
    }

    #[test]
    fn test_unknown_index() {
        assert_eq!(CardCatalog::info(78), CardInfo { name: "?", meaning: "?" });
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("직관, 내면의 지혜", 18), "직관, 내면의 지혜");
        assert_eq!(truncate_chars("가나다라마", 3), "가나다…");
    }
}
