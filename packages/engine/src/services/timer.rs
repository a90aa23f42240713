use chrono::Duration;
use log::info;

use crate::error::GameError;
use crate::models::game::Game;
use crate::models::message::Message;

impl Game {
    /// 締め切りを早める。1フェーズにつき1人1回 (延長と共通)
    pub fn request_hurry(&mut self, id: &str) -> Vec<Message> {
        let deadline = match self.check_time_request(id) {
            Ok(deadline) => deadline,
            Err(err) => return vec![err.into_notice(id)],
        };

        self.deadline = Some(deadline - self.adjustment_step());
        self.hurries.push(id.to_string());
        info!("{} hurried game {}: {} seconds left", id, self.id, self.seconds_left());

        vec![Message::channel(format!(
            "tick-tock! players have {} seconds before {}!",
            self.seconds_left(),
            self.deadline_label()
        ))]
    }

    /// 締め切りを延ばす。最初のフェーズ中に延ばすと途中参加も受け付けるようになる
    pub fn request_extend(&mut self, id: &str) -> Vec<Message> {
        let deadline = match self.check_time_request(id) {
            Ok(deadline) => deadline,
            Err(err) => return vec![err.into_notice(id)],
        };

        let now = self.clock.now();
        self.deadline = Some(match self.phase {
            None => {
                let remaining = deadline - now;
                let extra = Duration::seconds(self.config.lobby_extend_seconds);
                if remaining < extra {
                    now + remaining + extra
                } else {
                    now + Duration::seconds(self.config.lobby_seconds)
                }
            }
            Some(phase) => {
                if phase == 0 {
                    self.allow_late = true;
                }
                deadline + self.adjustment_step()
            }
        });
        self.hurries.push(id.to_string());
        info!("{} extended game {}: {} seconds left", id, self.id, self.seconds_left());

        vec![Message::channel(format!(
            "players have {} seconds before {}.",
            self.seconds_left(),
            self.deadline_label()
        ))]
    }

    /// 参加者でまだ今フェーズに要求していなければ現在の締め切りを返す
    fn check_time_request(&self, id: &str) -> Result<chrono::DateTime<chrono::Utc>, GameError> {
        if self.ended {
            return Err(GameError::GameOver);
        }
        if self.player(id).is_none() {
            return Err(GameError::NotPlaying);
        }
        if self.hurries.iter().any(|h| h == id) {
            return Err(GameError::AlreadyRequestedThisPhase);
        }
        self.deadline.ok_or(GameError::GameNotStarted)
    }

    /// 残り時間を生存者数 (最低4) で割った分だけ動かす
    fn adjustment_step(&self) -> Duration {
        let remaining = self
            .deadline
            .map_or_else(Duration::zero, |deadline| deadline - self.clock.now())
            .max(Duration::zero());
        remaining / self.num_players_alive().max(4) as i32
    }

    fn deadline_label(&self) -> String {
        match self.phase_kind() {
            Some(kind) => format!("the {} ends", kind),
            None => "the game starts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::GameConfig;
    use crate::utils::clock::ManualClock;
    use std::sync::Arc;

    fn started(n: usize) -> (Game, ManualClock) {
        let clock = ManualClock::starting_now();
        let mut game = Game::with_seed(GameConfig::default(), Arc::new(clock.clone()), 8);
        for i in 0..n {
            game.join(&i.to_string(), &format!("p{}", i));
        }
        (game, clock)
    }

    #[test]
    fn test_hurry_once_per_phase() {
        let (mut game, _clock) = started(4);
        game.change_phase().unwrap();
        game.change_phase().unwrap();
        assert_eq!(game.seconds_left(), 120);

        let messages = game.request_hurry("0");
        assert_eq!(
            messages[0].text,
            "tick-tock! players have 90 seconds before the night ends!"
        );

        let messages = game.request_hurry("0");
        assert_eq!(messages, vec![GameError::AlreadyRequestedThisPhase.into_notice("0")]);
        let messages = game.request_extend("0");
        assert_eq!(messages, vec![GameError::AlreadyRequestedThisPhase.into_notice("0")]);
        assert_eq!(game.seconds_left(), 90);

        game.change_phase().unwrap();
        assert!(game.request_hurry("0")[0].is_public());
    }

    #[test]
    fn test_extend_in_lobby() {
        let (mut game, clock) = started(2);
        clock.advance_secs(40);
        let messages = game.request_extend("0");
        assert_eq!(messages[0].text, "players have 50 seconds before the game starts.");

        clock.advance_secs(5);
        let messages = game.request_extend("1");
        assert_eq!(messages[0].text, "players have 60 seconds before the game starts.");
    }

    #[test]
    fn test_extend_opening_phase_allows_late_join() {
        let (mut game, _clock) = started(4);
        game.change_phase().unwrap();
        assert!(!game.allow_late);

        game.request_extend("1");
        assert!(game.allow_late);
        assert_eq!(game.seconds_left(), 75);
    }

    #[test]
    fn test_outsider_cannot_hurry() {
        let (mut game, _clock) = started(4);
        let messages = game.request_hurry("zed");
        assert_eq!(messages, vec![GameError::NotPlaying.into_notice("zed")]);
    }
}
