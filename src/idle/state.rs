//! Idle Forge の経済状態とコンテンツ定義。

use serde::{Deserialize, Deserializer, Serialize};

/// 所持レベル 1 つごとにコストに掛かる倍率。
pub const COST_GROWTH: f64 = 1.15;
/// 最初のプレステージに必要なリソース。
pub const PRESTIGE_BASE: f64 = 10_000.0;
/// プレステージの閾値は毎回この倍数で増える。
pub const PRESTIGE_GROWTH: f64 = 3.0;
/// プレステージのたびに倍率へ掛ける係数。
pub const PRESTIGE_FACTOR: f64 = 1.5;

/// 毎秒の生産レートを増やす、繰り返し購入できる強化。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_cost: f64,
    /// 1 レベルあたりの生産レート（倍率適用前）。
    pub base_value: f64,
    pub level: u32,
}

impl Upgrade {
    pub fn new(id: &str, name: &str, description: &str, base_cost: f64, base_value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            base_cost,
            base_value,
            level: 0,
        }
    }

    /// `level` レベル所持しているときの次のレベルのコスト。
    pub fn cost_at(base_cost: f64, level: u32) -> f64 {
        (base_cost * COST_GROWTH.powi(level as i32)).floor()
    }

    /// 次のレベルの現在のコスト。
    pub fn cost(&self) -> f64 {
        Self::cost_at(self.base_cost, self.level)
    }

    /// 所持レベルによる倍率適用前のレート。
    pub fn rate(&self) -> f64 {
        self.level as f64 * self.base_value
    }
}

/// ストア商品の購入時に 1 回だけ適用される恒久効果。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoreEffect {
    MultiplyPrestigeMultiplier(f64),
    AddClickValue(f64),
}

impl StoreEffect {
    /// ストアパネル用の短いラベル。
    pub fn label(&self) -> String {
        match self {
            StoreEffect::MultiplyPrestigeMultiplier(f) => format!("x{} multiplier", f),
            StoreEffect::AddClickValue(v) => format!("+{} per click", v),
        }
    }
}

/// 一度きりの購入。プレステージ後は再び買える。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub bought: bool,
    pub effect: StoreEffect,
}

impl StoreItem {
    pub fn new(id: &str, name: &str, description: &str, cost: f64, effect: StoreEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            cost,
            bought: false,
            effect,
        }
    }
}

/// 実績の解除条件。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    ResourceAtLeast(f64),
    TicksAtLeast(u64),
    PrestigeAtLeast(u32),
    RateAtLeast(f64),
    /// 別の実績（id 指定）が解除済み。
    Unlocked(String),
    AllOf(Vec<Condition>),
}

/// 一方向の解除。プレステージでも消えない。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    pub condition: Condition,
}

impl Achievement {
    pub fn new(id: &str, name: &str, description: &str, condition: Condition) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            unlocked: false,
            condition,
        }
    }
}

/// 1 セッション分の進行状況すべて。
///
/// デシリアライズは [`EconomyState::default`] の上にマージする。欠けたスカラーは
/// 初期値になり、欠けた列は既定の定義に丸ごと戻る。`per_second` は保存しないので
/// ロード後に呼び出し側で再計算する。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyState {
    pub resource: f64,
    /// アップグレードのレベルと倍率から導出する。
    #[serde(skip)]
    pub per_second: f64,
    /// 1 クリックあたりの獲得量（倍率適用前）。
    pub click_value: f64,
    pub prestige_count: u32,
    pub prestige_multiplier: f64,
    /// tick の実行回数。プレステージでも残る。
    pub tick_count: u64,
    /// 最後に生産を加算した時刻（ms）。
    pub last_tick_ms: f64,
    /// 最後にセーブに成功した時刻（ms）。
    pub last_saved_ms: Option<f64>,
    #[serde(deserialize_with = "upgrades_or_default")]
    pub upgrades: Vec<Upgrade>,
    #[serde(deserialize_with = "store_or_default")]
    pub store: Vec<StoreItem>,
    #[serde(deserialize_with = "achievements_or_default")]
    pub achievements: Vec<Achievement>,
}

// 列が `null` のときは欠落と同じく既定の定義に戻す。

fn upgrades_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Upgrade>, D::Error> {
    Ok(Option::deserialize(d)?.unwrap_or_else(EconomyState::create_upgrades))
}

fn store_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<StoreItem>, D::Error> {
    Ok(Option::deserialize(d)?.unwrap_or_else(EconomyState::create_store))
}

fn achievements_or_default<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Vec<Achievement>, D::Error> {
    Ok(Option::deserialize(d)?.unwrap_or_else(EconomyState::create_achievements))
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl EconomyState {
    pub fn new(now_ms: f64) -> Self {
        let mut state = Self {
            resource: 0.0,
            per_second: 0.0,
            click_value: 1.0,
            prestige_count: 0,
            prestige_multiplier: 1.0,
            tick_count: 0,
            last_tick_ms: now_ms,
            last_saved_ms: None,
            upgrades: Self::create_upgrades(),
            store: Self::create_store(),
            achievements: Self::create_achievements(),
        };
        state.recompute_rate();
        state
    }

    pub fn create_upgrades() -> Vec<Upgrade> {
        vec![
            Upgrade::new("auto-1", "Generator I", "Adds production per second", 15.0, 0.5),
            Upgrade::new("auto-2", "Generator II", "Stronger generator", 150.0, 6.0),
            Upgrade::new("click-1", "Reinforced Click", "Increases click value", 50.0, 1.0),
        ]
    }

    pub fn create_store() -> Vec<StoreItem> {
        vec![StoreItem::new(
            "mult-1",
            "Production x2",
            "Double production permanently",
            1_000.0,
            StoreEffect::MultiplyPrestigeMultiplier(2.0),
        )]
    }

    pub fn create_achievements() -> Vec<Achievement> {
        vec![
            Achievement::new(
                "ach-1",
                "First Tap",
                "Tap once",
                Condition::AllOf(vec![
                    Condition::TicksAtLeast(1),
                    Condition::ResourceAtLeast(1.0),
                ]),
            ),
            Achievement::new(
                "ach-2",
                "Collector",
                "Reach 1000 resources",
                Condition::ResourceAtLeast(1_000.0),
            ),
        ]
    }

    /// アップグレードのレベルと倍率から `per_second` を再計算する。
    pub fn recompute_rate(&mut self) {
        let base: f64 = self.upgrades.iter().map(|u| u.rate()).sum();
        self.per_second = base * self.prestige_multiplier;
    }

    /// プレステージ `count` 回済みのときに必要なリソース。
    pub fn threshold_for(count: u32) -> f64 {
        PRESTIGE_BASE * PRESTIGE_GROWTH.powi(count as i32)
    }

    pub fn prestige_threshold(&self) -> f64 {
        Self::threshold_for(self.prestige_count)
    }

    pub fn can_prestige(&self) -> bool {
        self.resource >= self.prestige_threshold()
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.resource >= cost
    }

    /// 手動クリック 1 回の獲得量。
    pub fn click_yield(&self) -> f64 {
        self.click_value * self.prestige_multiplier
    }

    pub fn is_unlocked(&self, achievement_id: &str) -> bool {
        self.achievements
            .iter()
            .any(|a| a.id == achievement_id && a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}
