//! Battle orchestration for a single session.
//!
//! [`BattleEngine`] is the authoritative reducer for [`SessionState`]. Puzzle
//! signals become combat rounds, and a round's consequences (rewards,
//! progression, the next spawn) are applied when the round is finished.
//!
//! # Round lifecycle
//!
//! ```text
//! puzzle_correct / puzzle_wrong   resolve hits, open the round guard
//!          |  (caller paces the hits)
//! finish_round(ticket)            close the guard, apply the follow-up
//! ```
//!
//! While a round is open every other round request is rejected with
//! [`BattleError::RoundInFlight`] and leaves the state untouched. Tickets are
//! tagged with the session and encounter they were issued for, so a
//! continuation that outlives its session is rejected as stale.

mod errors;
mod events;

pub use errors::BattleError;
pub use events::BattleEvent;

use crate::combat::{AttackGroup, FollowUp, RoundResolution, RoundTicket, resolve_round};
use crate::encounter::{EncounterFactory, EncounterOrigin};
use crate::env::GameEnv;
use crate::progression::{ProgressionTracker, claim_reward};
use crate::puzzle::{PuzzleRequest, PuzzleSignal};
use crate::state::{
    Combatant, Player, PlayerSetup, SavedSession, SessionId, SessionState, SessionStatus,
};

/// First puzzle of a started or restored session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opening {
    pub events: Vec<BattleEvent>,
    pub request: PuzzleRequest,
}

/// Immediate result of a puzzle signal.
///
/// Damage is already applied; the follow-up runs on `finish_round`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub ticket: RoundTicket,
    pub resolution: RoundResolution,
    pub follow_up: FollowUp,
    pub events: Vec<BattleEvent>,
}

/// What finishing a round produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundCompletion {
    pub follow_up: FollowUp,
    pub events: Vec<BattleEvent>,
    /// Next puzzle to dispatch, if the puzzle layer needs a new one.
    pub request: Option<PuzzleRequest>,
}

pub struct BattleEngine<'a> {
    state: &'a mut SessionState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }

    /// Builds a session for a new run: the player is created from the hero
    /// template and profile, at step 1 of the first playable station.
    pub fn create_session(
        env: GameEnv<'_>,
        session: SessionId,
        setup: PlayerSetup,
    ) -> Result<SessionState, BattleError> {
        let config = env.game_config()?;
        let hero = env
            .heroes()?
            .hero(&setup.hero)
            .ok_or_else(|| BattleError::UnknownHero(setup.hero.clone()))?;
        let position = ProgressionTracker::from_config(config).start_position(env.world()?)?;

        let player = Player::from_hero(
            setup.id,
            setup.display_name,
            &hero,
            &setup.profile,
            &config.growth,
            position,
        );
        Ok(SessionState::new(session, player))
    }

    /// Spawns the first monster of a pending session.
    pub fn start(&mut self, env: GameEnv<'_>) -> Result<Opening, BattleError> {
        if self.state.status != SessionStatus::Pending {
            return Err(BattleError::SessionInactive(self.state.status));
        }
        let event = self.spawn(env)?;
        self.state.status = SessionStatus::Active;
        self.opening(vec![event])
    }

    pub fn on_signal(
        &mut self,
        env: GameEnv<'_>,
        signal: PuzzleSignal,
    ) -> Result<RoundReport, BattleError> {
        match signal {
            PuzzleSignal::Correct { hits, advance } => self.puzzle_correct(env, hits, advance),
            PuzzleSignal::Wrong => self.puzzle_wrong(env),
        }
    }

    /// The hero strikes `hits` times.
    pub fn puzzle_correct(
        &mut self,
        _env: GameEnv<'_>,
        hits: u32,
        advance: bool,
    ) -> Result<RoundReport, BattleError> {
        if hits == 0 {
            return Err(BattleError::InvalidHits);
        }
        self.play_round(&[AttackGroup::hero(hits)], advance)
    }

    /// The monster strikes once.
    pub fn puzzle_wrong(&mut self, _env: GameEnv<'_>) -> Result<RoundReport, BattleError> {
        self.play_round(&[AttackGroup::monster(1)], false)
    }

    fn play_round(
        &mut self,
        groups: &[AttackGroup],
        advance: bool,
    ) -> Result<RoundReport, BattleError> {
        if !self.state.is_active() {
            return Err(BattleError::SessionInactive(self.state.status));
        }
        let monster = self.state.monster.as_mut().ok_or(BattleError::NoEncounter)?;
        let ticket = self.state.guard.begin(self.state.session, monster.encounter)?;

        let resolution = resolve_round(&mut self.state.player, monster, groups);
        let follow_up = resolution.outcome.follow_up(advance);
        let event = BattleEvent::RoundResolved {
            ticket,
            outcome: resolution.outcome,
            hits: resolution.hits.clone(),
            player_hp: self.state.player.hp(),
            monster_hp: monster.hp(),
        };
        self.state.set_pending(Some(follow_up));

        Ok(RoundReport {
            ticket,
            resolution,
            follow_up,
            events: vec![event],
        })
    }

    /// Closes the round issued as `ticket` and applies its follow-up.
    ///
    /// # Errors
    ///
    /// `StaleRound` or `NoRoundInFlight` when `ticket` is not the open round;
    /// the state is left as it was. Oracle failures while advancing are
    /// reported after the guard is released.
    pub fn finish_round(
        &mut self,
        env: GameEnv<'_>,
        ticket: RoundTicket,
    ) -> Result<RoundCompletion, BattleError> {
        self.state.guard.complete(&ticket)?;
        let follow_up = self.state.pending().unwrap_or(FollowUp::Continue);
        self.state.set_pending(None);

        let (events, request) = match follow_up {
            FollowUp::Continue => (Vec::new(), None),
            FollowUp::NextPuzzle => (Vec::new(), self.state.current_request()),
            FollowUp::PlayerDefeated => {
                self.state.status = SessionStatus::Defeated;
                let position = self.state.player.position.clone();
                (vec![BattleEvent::PlayerDefeated { position }], None)
            }
            FollowUp::MonsterDefeated => self.handle_monster_defeat(env)?,
        };

        Ok(RoundCompletion {
            follow_up,
            events,
            request,
        })
    }

    /// Drops the open round without applying its follow-up.
    pub fn cancel_round(&mut self) -> Option<RoundTicket> {
        self.state.set_pending(None);
        self.state.guard.cancel()
    }

    /// Ends the session. Any open round is cancelled.
    pub fn end(&mut self) -> Option<RoundTicket> {
        self.state.status = SessionStatus::Ended;
        self.cancel_round()
    }

    pub fn snapshot(&self) -> SavedSession {
        self.state.snapshot()
    }

    /// Replaces the session with one rebuilt from `saved`.
    ///
    /// The rebuilt session gets a fresh id, so tickets issued before the
    /// restore are stale. The monster is respawned from content and keeps its
    /// saved hp only if the step still names the same template.
    pub fn restore(
        &mut self,
        env: GameEnv<'_>,
        saved: &SavedSession,
    ) -> Result<Opening, BattleError> {
        let config = env.game_config()?;
        let world = env.world()?;
        let hero = env
            .heroes()?
            .hero(&saved.hero)
            .ok_or_else(|| BattleError::UnknownHero(saved.hero.clone()))?;

        let position = saved
            .position
            .normalized(ProgressionTracker::from_config(config).total_steps());
        if world.station(&position.station).is_none() {
            return Err(crate::env::OracleError::StationNotFound(position.station).into());
        }

        let mut player = Player::from_hero(
            saved.player_id,
            saved.display_name.clone(),
            &hero,
            &saved.profile,
            &config.growth,
            position,
        );
        // A saved session always belongs to a living player.
        player.vitals_mut().set_hp(saved.hp.max(1));

        // Built aside so a failed spawn leaves the current session intact.
        let mut state = SessionState::new(self.state.session.next(), player);
        let mut event = BattleEngine::new(&mut state).spawn(env)?;
        if let (Some(snapshot), Some(monster)) = (&saved.monster, state.monster.as_mut()) {
            if snapshot.apply_to(monster) {
                if let BattleEvent::EncounterStarted { hp, .. } = &mut event {
                    *hp = monster.hp();
                }
            }
        }
        state.status = SessionStatus::Active;
        *self.state = state;
        self.opening(vec![event])
    }

    fn handle_monster_defeat(
        &mut self,
        env: GameEnv<'_>,
    ) -> Result<(Vec<BattleEvent>, Option<PuzzleRequest>), BattleError> {
        let config = env.game_config()?;
        let world = env.world()?;
        let monster = self.state.monster.as_mut().ok_or(BattleError::NoEncounter)?;

        let mut events = Vec::new();
        if let Some(reward) = claim_reward(&mut self.state.player, monster, config) {
            events.push(BattleEvent::MonsterDefeated {
                tier: reward.tier,
                exp_reward: reward.exp_reward,
                currency_reward: reward.currency_reward,
            });
            if reward.hp_restored > 0 {
                events.push(BattleEvent::HpRestored {
                    amount: reward.hp_restored,
                    hp: self.state.player.hp(),
                });
            }
            events.extend(
                reward
                    .levels_reached
                    .into_iter()
                    .map(|level| BattleEvent::PlayerLeveledUp { level }),
            );
            if let Some(hero_id) = reward.hero_unlocked {
                events.push(BattleEvent::HeroUnlocked { hero_id });
            }
        }

        let transition =
            ProgressionTracker::from_config(config).advance(world, &self.state.player.position)?;
        let Some(next) = transition.position() else {
            self.state.status = SessionStatus::Complete;
            self.state.monster = None;
            self.state.puzzle = None;
            events.push(BattleEvent::GameComplete {
                position: self.state.player.position.clone(),
            });
            return Ok((events, None));
        };

        let from = std::mem::replace(&mut self.state.player.position, next.clone());
        events.push(BattleEvent::PositionAdvanced {
            from,
            to: next.clone(),
            phase: transition.phase(),
        });
        events.push(self.spawn(env)?);
        Ok((events, self.state.current_request()))
    }

    /// Replaces the current monster with the spawn for the player's position.
    fn spawn(&mut self, env: GameEnv<'_>) -> Result<BattleEvent, BattleError> {
        let config = env.game_config()?;
        let factory = EncounterFactory::new(env.steps()?, env.monsters()?, config);
        let encounter_id = self.state.next_encounter();
        let encounter = factory.spawn(&self.state.player.position, encounter_id);

        let event = BattleEvent::EncounterStarted {
            encounter: encounter_id,
            monster: encounter.monster.template_id.clone(),
            name: encounter.monster.name.clone(),
            tier: encounter.monster.tier,
            hp: encounter.monster.hp(),
            position: encounter.position,
            puzzle: encounter.puzzle.clone(),
            origin: encounter.origin,
        };
        self.state.monster = Some(encounter.monster);
        self.state.puzzle = Some(encounter.puzzle);
        Ok(event)
    }

    fn opening(&self, events: Vec<BattleEvent>) -> Result<Opening, BattleError> {
        let request = self
            .state
            .current_request()
            .ok_or(BattleError::NoEncounter)?;
        Ok(Opening { events, request })
    }
}

/// True when `event` reports a spawn that fell back to the default monster.
pub fn is_fallback_spawn(event: &BattleEvent) -> bool {
    matches!(
        event,
        BattleEvent::EncounterStarted {
            origin: EncounterOrigin::Fallback(_),
            ..
        }
    )
}
