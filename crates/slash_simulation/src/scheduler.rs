//! Scheduler — отложенные задачи с отменой по handle
//!
//! Заменяет timer callbacks движка:
//! - `schedule(entity, task, delay)` → `TaskHandle`
//! - `cancel(handle)` снимает задачу (повторная отмена — no-op)
//! - `tick_scheduler` (FixedUpdate) пишет `TimerFired` для созревших задач
//!
//! Владелец handle обязан отменить старую задачу перед повторным arm.

use bevy::prelude::*;

/// Handle отложенной задачи (уникален в пределах Scheduler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TaskHandle(u64);

/// Что сделать, когда таймер сработает
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    /// Пауза патруля кончилась → идти к patrol target
    PatrolPauseFinished,
    /// Задержка перед атакой врага
    EnemyAttack,
    /// Труп врага пора убрать
    LifeSpanExpired,
}

#[derive(Debug, Clone, Copy)]
struct PendingTask {
    handle: TaskHandle,
    entity: Entity,
    task: ScheduledTask,
    remaining: f32,
}

/// Event: задача созрела
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimerFired {
    pub handle: TaskHandle,
    pub entity: Entity,
    pub task: ScheduledTask,
}

/// Очередь отложенных задач (resource)
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    next_handle: u64,
    pending: Vec<PendingTask>,
}

impl Scheduler {
    pub fn schedule(&mut self, entity: Entity, task: ScheduledTask, delay: f32) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(PendingTask {
            handle,
            entity,
            task,
            remaining: delay.max(0.0),
        });
        handle
    }

    /// true если задача была в очереди
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.handle != handle);
        self.pending.len() != before
    }

    /// Отменить задачу из слота владельца и очистить слот
    pub fn cancel_slot(&mut self, slot: &mut Option<TaskHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    /// Снять все задачи entity (despawn, смерть)
    pub fn cancel_entity(&mut self, entity: Entity) {
        self.pending.retain(|pending| pending.entity != entity);
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|pending| pending.handle == handle)
    }

    pub fn remaining(&self, handle: TaskHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|pending| pending.handle == handle)
            .map(|pending| pending.remaining)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Продвинуть время; созревшие задачи уходят из очереди в порядке постановки
    pub fn advance(&mut self, delta: f32) -> Vec<TimerFired> {
        let mut fired = Vec::new();

        self.pending.retain_mut(|pending| {
            pending.remaining -= delta;
            if pending.remaining <= 0.0 {
                fired.push(TimerFired {
                    handle: pending.handle,
                    entity: pending.entity,
                    task: pending.task,
                });
                false
            } else {
                true
            }
        });

        fired
    }
}

/// Система: тикает Scheduler на fixed delta
pub fn tick_scheduler(
    mut scheduler: ResMut<Scheduler>,
    time: Res<Time<Fixed>>,
    mut fired_events: EventWriter<TimerFired>,
) {
    let delta = time.delta_secs();
    for fired in scheduler.advance(delta) {
        fired_events.write(fired);
    }
}
