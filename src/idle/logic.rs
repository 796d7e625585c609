//! Idle Forge のゲームロジック。`EconomyState` に対する純粋な状態遷移。

use super::error::GameError;
use super::state::{Condition, EconomyState, StoreEffect, PRESTIGE_FACTOR};

/// 前回のステップからの経過時間ぶんの生産を加算する。
/// このステップで解除された実績の名前を返す。
pub fn advance(state: &mut EconomyState, now_ms: f64) -> Vec<String> {
    // 時計が戻った場合は何も加算しない。
    let dt = ((now_ms - state.last_tick_ms) / 1000.0).max(0.0);
    state.last_tick_ms = now_ms;
    state.resource += state.per_second * dt;
    state.tick_count += 1;
    check_achievements(state)
}

/// 手動クリック。獲得量を返す。
pub fn click(state: &mut EconomyState) -> f64 {
    let gain = state.click_yield();
    state.resource += gain;
    gain
}

/// アップグレードを 1 レベル購入する。新しいレベルを返す。
pub fn buy_upgrade(state: &mut EconomyState, id: &str) -> Result<u32, GameError> {
    let idx = state
        .upgrades
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| GameError::NotFound { id: id.into() })?;

    let cost = state.upgrades[idx].cost();
    if !state.can_afford(cost) {
        return Err(GameError::InsufficientResource {
            required: cost,
            available: state.resource,
        });
    }

    state.resource -= cost;
    state.upgrades[idx].level += 1;
    state.recompute_rate();
    Ok(state.upgrades[idx].level)
}

/// 一度きりのストア商品を購入し、効果を適用する。
pub fn buy_store_item(state: &mut EconomyState, id: &str) -> Result<(), GameError> {
    let idx = state
        .store
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| GameError::NotFound { id: id.into() })?;

    if state.store[idx].bought {
        return Err(GameError::AlreadyOwned { id: id.into() });
    }
    let cost = state.store[idx].cost;
    if !state.can_afford(cost) {
        return Err(GameError::InsufficientResource {
            required: cost,
            available: state.resource,
        });
    }

    state.resource -= cost;
    state.store[idx].bought = true;
    let effect = state.store[idx].effect.clone();
    apply_store_effect(state, &effect);
    state.recompute_rate();
    Ok(())
}

/// ストア効果を適用する。1 回限りなのは `bought` のガードによる。
fn apply_store_effect(state: &mut EconomyState, effect: &StoreEffect) {
    match effect {
        StoreEffect::MultiplyPrestigeMultiplier(factor) => {
            state.prestige_multiplier *= factor;
        }
        StoreEffect::AddClickValue(amount) => {
            state.click_value += amount;
        }
    }
}

/// 現在の周回を倍率の恒久的な上昇と引き換える。新しいプレステージ回数を返す。
///
/// アップグレードのレベルとストアの購入状態はリセットする。
/// ストアで得た倍率、実績、tick カウンタはそのまま残る。
pub fn prestige(state: &mut EconomyState) -> Result<u32, GameError> {
    let required = state.prestige_threshold();
    if state.resource < required {
        return Err(GameError::InsufficientResource {
            required,
            available: state.resource,
        });
    }

    state.prestige_count += 1;
    state.prestige_multiplier *= PRESTIGE_FACTOR;
    state.resource = 0.0;
    for upgrade in &mut state.upgrades {
        upgrade.level = 0;
    }
    for item in &mut state.store {
        item.bought = false;
    }
    state.recompute_rate();
    Ok(state.prestige_count)
}

/// 条件を満たした未解除の実績を並び順に解除する。新たに解除した実績の名前を返す。
pub fn check_achievements(state: &mut EconomyState) -> Vec<String> {
    let mut unlocked = Vec::new();
    for i in 0..state.achievements.len() {
        if state.achievements[i].unlocked {
            continue;
        }
        if condition_met(state, &state.achievements[i].condition) {
            state.achievements[i].unlocked = true;
            unlocked.push(state.achievements[i].name.clone());
        }
    }
    unlocked
}

/// 実績の条件を評価する。副作用なし。
pub fn condition_met(state: &EconomyState, condition: &Condition) -> bool {
    match condition {
        Condition::ResourceAtLeast(n) => state.resource >= *n,
        Condition::TicksAtLeast(n) => state.tick_count >= *n,
        Condition::PrestigeAtLeast(n) => state.prestige_count >= *n,
        Condition::RateAtLeast(n) => state.per_second >= *n,
        Condition::Unlocked(id) => state.is_unlocked(id),
        Condition::AllOf(all) => all.iter().all(|c| condition_met(state, c)),
    }
}
