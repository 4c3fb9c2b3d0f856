use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::Seat;
use crate::engine::actions::ActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Ход и участие в раздаче проверяет вызывающий код; здесь только суммы и фаза.
/// Суммы больше стека не ошибка: движок урежет их до олл-ина.
pub fn validate_action(
    seat: &Seat,
    action: &ActionKind,
    betting: &BettingState,
    big_blind: Chips,
) -> Result<(), EngineError> {
    let to_call = seat.to_call(betting.current_bet);

    match *action {
        ActionKind::Fold => Ok(()),

        ActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::IllegalAmount(format!(
                    "нельзя check: нужно доставить {to_call}"
                )))
            }
        }

        ActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::IllegalAmount(
                    "нечего уравнивать, используйте check".into(),
                ))
            } else {
                Ok(())
            }
        }

        ActionKind::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                return Err(EngineError::IllegalAmount(format!(
                    "ставка {} уже есть, используйте raise",
                    betting.current_bet
                )));
            }
            if amount.is_zero() {
                return Err(EngineError::IllegalAmount("bet должен быть > 0".into()));
            }
            // Меньше BB можно только олл-ином.
            if amount < big_blind && amount < seat.stack {
                return Err(EngineError::IllegalAmount(format!(
                    "минимальный bet {big_blind}"
                )));
            }
            Ok(())
        }

        ActionKind::Raise(total) => {
            if betting.current_bet.is_zero() {
                return Err(EngineError::IllegalAmount(
                    "ставки нет, используйте bet".into(),
                ));
            }
            // Уже походил и не переоткрыт полным рейзом – только call/fold.
            if seat.has_acted {
                return Err(EngineError::IllegalAmount(
                    "неполный рейз не переоткрывает торговлю: только call или fold".into(),
                ));
            }

            let max_total = seat.street_bet + seat.stack;
            let effective = total.min(max_total);
            if effective <= betting.current_bet {
                return Err(EngineError::IllegalAmount(format!(
                    "рейз должен превышать текущую ставку {}",
                    betting.current_bet
                )));
            }

            let raise_size = effective - betting.current_bet;
            let all_in = effective == max_total;
            if raise_size < betting.min_raise && !all_in {
                return Err(EngineError::IllegalAmount(format!(
                    "минимальный рейз до {}",
                    betting.current_bet + betting.min_raise
                )));
            }
            Ok(())
        }
    }
}

/// Какие действия доступны игроку на ходу (для per-seat view).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub fold: bool,
    pub check: bool,
    /// Сколько стоит call (урезано до стека), если он доступен.
    pub call: Option<Chips>,
    /// Диапазон bet: (min, max).
    pub bet: Option<(Chips, Chips)>,
    /// Диапазон новой общей ставки при raise: (min, max).
    pub raise: Option<(Chips, Chips)>,
}

pub fn legal_actions(seat: &Seat, betting: &BettingState, big_blind: Chips) -> LegalActions {
    if !seat.can_act() {
        return LegalActions::default();
    }

    let to_call = seat.to_call(betting.current_bet);
    let max_total = seat.street_bet + seat.stack;

    let bet = if betting.current_bet.is_zero() && !seat.stack.is_zero() {
        Some((big_blind.min(seat.stack), seat.stack))
    } else {
        None
    };

    let raise = if !betting.current_bet.is_zero()
        && !seat.has_acted
        && max_total > betting.current_bet
    {
        let min_total = (betting.current_bet + betting.min_raise).min(max_total);
        Some((min_total, max_total))
    } else {
        None
    };

    LegalActions {
        fold: true,
        check: to_call.is_zero(),
        call: if to_call.is_zero() {
            None
        } else {
            Some(to_call.min(seat.stack))
        },
        bet,
        raise,
    }
}
