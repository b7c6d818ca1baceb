//! Pre-authored survey commentary
//!
//! Every "analysis" the dashboard shows is a lookup into this table. The
//! records were written by hand against the 2014-2024 census maps; nothing
//! here is computed. The SPEI itself is an external product and never enters
//! the process - the correlation column is the surveyor's judgment, not a
//! statistic.
//!
//! # Lookup contract
//!
//! `lookup` is pure and total: any (species, month) pair returns a record,
//! and pairs without authored commentary return [`DEFAULT_FINDING`]. Callers
//! never need to handle an error or an empty string.
//!
//! # Reading the records
//!
//! - **sensitivity** (민감도): how strongly the species tracks the dryness
//!   index at all, from 매우 낮음 to 매우 높음.
//! - **correlation** (상관성): direction of the observed pattern. 양의 상관
//!   means wetter conditions widen the distribution; 음의 상관 the reverse;
//!   무상관/불명확 mean the maps show no usable direction.
//! - **summary** (요약): the surveyor's note, tagged with the season it
//!   applies to ([동계] winter, [춘계] spring, [추계] autumn).

use crate::species::{Month, Species};
use serde::Serialize;

/// One authored judgment for a (species, month) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 민감도 - how strongly this species tracks SPEI in this month
    pub sensitivity: &'static str,
    /// 상관성 - direction of the observed pattern
    pub correlation: &'static str,
    /// 요약 - the surveyor's free-text note
    pub summary: &'static str,
}

/// Returned for every pair without authored commentary.
pub static DEFAULT_FINDING: Finding = Finding {
    sensitivity: "해당 없음",
    correlation: "해당 없음",
    summary: "특이 사항 없음.",
};

// 괭이갈매기 (bird1)

static GULL_WINTER: Finding = Finding {
    sensitivity: "높음",
    correlation: "양의 상관",
    summary: "[동계] SPEI가 높을수록(습윤) 분포가 증가하는 경향.",
};

static GULL_AUTUMN: Finding = Finding {
    sensitivity: "보통",
    correlation: "불명확",
    summary: "[추계] 22년, 24년에 특히 높은 밀도 기록.",
};

static GULL_MARCH_SURGE: Finding = Finding {
    sensitivity: "낮음",
    correlation: "불명확",
    summary: "[특이점] 23년 3월 이상 급증. 기후 외적 요인 영향 큼.",
};

// 흰뺨검둥오리 (bird2)

static DUCK_WINTER: Finding = Finding {
    sensitivity: "매우 낮음",
    correlation: "무상관",
    summary: "[동계] SPEI와 무관하게 전국적으로 고밀도 유지 (강한 내성).",
};

static DUCK_SPRING: Finding = Finding {
    sensitivity: "보통",
    correlation: "음의 상관",
    summary: "[춘계] 건조할수록 오히려 분포가 느는 역상관 경향 일부 관측.",
};

static DUCK_LATE_AUTUMN: Finding = Finding {
    sensitivity: "낮음",
    correlation: "무상관",
    summary: "[추세] 기후보다는 연도별 개체수 자체 증가 추세가 뚜렷함.",
};

// 쇠백로 (bird3)

static EGRET_JANUARY: Finding = Finding {
    sensitivity: "매우 높음",
    correlation: "강한 양의 상관",
    summary: "[핵심] SPEI와 가장 뚜렷한 양의 상관관계 (가뭄 시 분포 급감).",
};

static EGRET_FEBRUARY: Finding = Finding {
    sensitivity: "높음",
    correlation: "양의 상관",
    summary: "[동계] 1월보다 약하지만 습윤할수록 내륙 하천 분포 확대.",
};

static EGRET_DECEMBER: Finding = Finding {
    sensitivity: "높음",
    correlation: "양의 상관",
    summary: "[동계] 초겨울 SPEI 상승 구간에서 서식 범위 확대.",
};

// 왜가리 (bird4)

static HERON_LATE_WINTER: Finding = Finding {
    sensitivity: "낮음",
    correlation: "무상관",
    summary: "[동계] SPEI 변동과 무관하게 안정적인 저밀도 분포 유지.",
};

static HERON_JANUARY: Finding = Finding {
    sensitivity: "낮음",
    correlation: "무상관",
    summary: "[동계] 한파 시 결빙 없는 하구로 소폭 이동하는 정도.",
};

/// Best-matching record for a (species, month) pair.
///
/// Pure, total, order-independent. Pairs without authored commentary return
/// [`DEFAULT_FINDING`], never an error and never an empty record.
pub fn lookup(species: Species, month: Month) -> &'static Finding {
    match species {
        Species::BlackTailedGull => match month {
            Month::Dec | Month::Jan => &GULL_WINTER,
            Month::Oct => &GULL_AUTUMN,
            Month::Mar => &GULL_MARCH_SURGE,
            _ => &DEFAULT_FINDING,
        },
        Species::SpotBilledDuck => match month {
            Month::Jan | Month::Feb => &DUCK_WINTER,
            Month::Mar => &DUCK_SPRING,
            Month::Nov | Month::Dec => &DUCK_LATE_AUTUMN,
            _ => &DEFAULT_FINDING,
        },
        Species::LittleEgret => match month {
            Month::Jan => &EGRET_JANUARY,
            Month::Feb => &EGRET_FEBRUARY,
            Month::Dec => &EGRET_DECEMBER,
            _ => &DEFAULT_FINDING,
        },
        Species::GreyHeron => match month {
            Month::Feb | Month::Mar => &HERON_LATE_WINTER,
            Month::Jan => &HERON_JANUARY,
            _ => &DEFAULT_FINDING,
        },
    }
}

/// Whether a pair has authored commentary (as opposed to the default record).
pub fn authored(species: Species, month: Month) -> bool {
    !std::ptr::eq(lookup(species, month), &DEFAULT_FINDING)
}
