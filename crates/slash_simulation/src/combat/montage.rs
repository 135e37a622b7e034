//! Montages — анимационные клипы с секциями и выбор секции
//!
//! ECS только решает ЧТО играть (montage + section), хост проигрывает.
//! Обратно хост шлёт `AnimNotify` (конец атаки, окно коллизии оружия и т.п.).

use bevy::prelude::*;
use rand::Rng;

/// Blend-out при принудительной остановке attack montage (секунды)
pub const STOP_MONTAGE_BLEND_OUT: f32 = 0.25;

/// Montage: имя клипа + секции (seek points)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Montage {
    pub name: String,
    pub sections: Vec<String>,
}

impl Montage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_sections<I, S>(name: impl Into<String>, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}

/// Слот montage на персонаже
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MontageSlot {
    Attack,
    HitReact,
    Death,
    Dodge,
    Equip,
}

/// Набор montages персонажа. `None` = слот не настроен (команда не шлётся).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Montages {
    pub attack: Option<Montage>,
    pub hit_react: Option<Montage>,
    pub death: Option<Montage>,
    pub dodge: Option<Montage>,
    pub equip: Option<Montage>,
}

impl Default for Montages {
    fn default() -> Self {
        Self {
            attack: Some(Montage::with_sections("AttackMontage", ["Attack1", "Attack2"])),
            hit_react: Some(Montage::with_sections(
                "HitReactMontage",
                ["FromFront", "FromBack", "FromLeft", "FromRight"],
            )),
            death: Some(Montage::with_sections(
                "DeathMontage",
                ["Death1", "Death2", "Death3", "Death4", "Death5", "Death6"],
            )),
            dodge: Some(Montage::new("DodgeMontage")),
            equip: Some(Montage::with_sections("EquipMontage", ["Equip", "Unequip"])),
        }
    }
}

impl Montages {
    pub fn get(&self, slot: MontageSlot) -> Option<&Montage> {
        match slot {
            MontageSlot::Attack => self.attack.as_ref(),
            MontageSlot::HitReact => self.hit_react.as_ref(),
            MontageSlot::Death => self.death.as_ref(),
            MontageSlot::Dodge => self.dodge.as_ref(),
            MontageSlot::Equip => self.equip.as_ref(),
        }
    }
}

/// Outbound event: хост играет/останавливает montage
#[derive(Event, Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    /// `section: None` — играть montage целиком
    Play {
        entity: Entity,
        slot: MontageSlot,
        montage: String,
        section: Option<String>,
    },
    Stop {
        entity: Entity,
        slot: MontageSlot,
        montage: String,
        blend_out: f32,
    },
}

/// Inbound event: animation notifies от хоста
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimNotify {
    AttackEnd { entity: Entity },
    DodgeEnd { entity: Entity },
    HitReactEnd { entity: Entity },
    /// `equipped` — секция была "Equip" (оружие в руку)
    EquipEnd { entity: Entity, equipped: bool },
    /// Окно коллизии оружия открылось/закрылось
    WeaponCollision { entity: Entity, enabled: bool },
}

impl AnimNotify {
    pub fn entity(&self) -> Entity {
        match self {
            AnimNotify::AttackEnd { entity }
            | AnimNotify::DodgeEnd { entity }
            | AnimNotify::HitReactEnd { entity }
            | AnimNotify::EquipEnd { entity, .. }
            | AnimNotify::WeaponCollision { entity, .. } => *entity,
        }
    }
}

/// Выбранная секция: индекс + имя (None = весь montage)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChoice {
    pub index: usize,
    pub section: Option<String>,
}

/// Равномерный выбор секции. Пустой список → индекс 0, весь montage.
pub fn select_section<R: Rng + ?Sized>(rng: &mut R, sections: &[String]) -> SectionChoice {
    if sections.is_empty() {
        return SectionChoice {
            index: 0,
            section: None,
        };
    }

    let index = rng.gen_range(0..sections.len());
    SectionChoice {
        index,
        section: Some(sections[index].clone()),
    }
}

/// Команда "играть случайную секцию" + выбранный индекс
pub fn random_section_command<R: Rng + ?Sized>(
    rng: &mut R,
    entity: Entity,
    slot: MontageSlot,
    montage: &Montage,
) -> (usize, AnimationCommand) {
    let choice = select_section(rng, &montage.sections);
    let command = AnimationCommand::Play {
        entity,
        slot,
        montage: montage.name.clone(),
        section: choice.section,
    };
    (choice.index, command)
}

/// Команда "играть конкретную секцию"
pub fn section_command(entity: Entity, slot: MontageSlot, montage: &Montage, section: &str) -> AnimationCommand {
    AnimationCommand::Play {
        entity,
        slot,
        montage: montage.name.clone(),
        section: Some(section.to_string()),
    }
}

/// Команда "играть montage целиком"
pub fn full_montage_command(entity: Entity, slot: MontageSlot, montage: &Montage) -> AnimationCommand {
    AnimationCommand::Play {
        entity,
        slot,
        montage: montage.name.clone(),
        section: None,
    }
}

pub fn stop_command(entity: Entity, slot: MontageSlot, montage: &Montage) -> AnimationCommand {
    AnimationCommand::Stop {
        entity,
        slot,
        montage: montage.name.clone(),
        blend_out: STOP_MONTAGE_BLEND_OUT,
    }
}

/// Сыграть случайную секцию слота (если слот настроен). Возвращает индекс.
pub fn play_random_section<R: Rng + ?Sized>(
    rng: &mut R,
    entity: Entity,
    montages: &Montages,
    slot: MontageSlot,
    animations: &mut EventWriter<AnimationCommand>,
) -> Option<usize> {
    let montage = montages.get(slot)?;
    let (index, command) = random_section_command(rng, entity, slot, montage);
    animations.write(command);
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_sections_play_full_montage() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let montage = Montage::new("M");

        let (index, command) = random_section_command(&mut rng, Entity::from_raw(3), MontageSlot::Attack, &montage);

        assert_eq!(index, 0);
        assert_eq!(
            command,
            AnimationCommand::Play {
                entity: Entity::from_raw(3),
                slot: MontageSlot::Attack,
                montage: "M".to_string(),
                section: None,
            }
        );
    }

    #[test]
    fn test_section_index_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sections: Vec<String> = vec!["A".into(), "B".into(), "C".into()];

        let mut seen = [false; 3];
        for _ in 0..200 {
            let choice = select_section(&mut rng, &sections);
            assert!(choice.index < sections.len());
            assert_eq!(choice.section.as_deref(), Some(sections[choice.index].as_str()));
            seen[choice.index] = true;
        }

        // 200 попыток — каждая секция должна выпасть
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_sections() {
        let sections: Vec<String> = vec!["Attack1".into(), "Attack2".into()];
        let mut first = ChaCha8Rng::seed_from_u64(9);
        let mut second = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..20 {
            assert_eq!(select_section(&mut first, &sections), select_section(&mut second, &sections));
        }
    }

    #[test]
    fn test_unconfigured_slot() {
        let montages = Montages {
            dodge: None,
            ..Default::default()
        };
        assert!(montages.get(MontageSlot::Dodge).is_none());
        assert_eq!(montages.get(MontageSlot::Attack).map(|m| m.sections.len()), Some(2));
    }
}
