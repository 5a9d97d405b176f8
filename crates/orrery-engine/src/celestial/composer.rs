use std::collections::HashMap;
use crate::api::error::ConfigError;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, GameEvent};
use crate::celestial::body::InteractiveBody;
use crate::celestial::comet_rain::CometRain;
use crate::celestial::config::{LabelConfig, SceneConfig};
use crate::celestial::flyby::{FlybyController, FlybyTransition};
use crate::celestial::orbit::scale_radius;
use crate::components::entity::Entity;
use crate::components::mesh::{MeshColor, MeshComponent, MeshShape};
use crate::input::queue::{InputEvent, InputQueue};
use crate::overlay::broadcast::{AnchorLabel, HoverBroadcast, OverlayProjection};

/// Game event: flyby visibility changed. `a` = 1 active, 0 inactive.
pub const EVENT_FLYBY: f32 = 1.0;
/// Game event: hover description changed. `a` = described entity id, -1 when cleared.
pub const EVENT_HOVER: f32 = 2.0;

pub const STAR_TAG: &str = "star";
pub const ORBIT_TAG: &str = "orbit";

const ORBIT_TUBE: f32 = 0.05;

/// Assembles star, planets, comet rain and flyby into one scene and routes
/// pointer input, timers and per-frame ticks between them.
pub struct OrreryScene {
    /// Star first, then planets in configuration order.
    bodies: Vec<InteractiveBody>,
    index: HashMap<EntityId, usize>,
    comet_rain: CometRain,
    flyby: FlybyController,
    hover: HoverBroadcast,
    label_body: usize,
    label: LabelConfig,
    alive: bool,
}

impl OrreryScene {
    /// Validate `config` and spawn everything into `ctx`.
    /// Nothing is spawned if validation fails.
    pub fn compose(config: &SceneConfig, ctx: &mut EngineContext) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut bodies = Vec::with_capacity(config.planets.len() + 1);
        let mut staged = Vec::with_capacity(config.planets.len() * 2 + 1);

        let star_cfg = &config.star;
        let star_color = MeshColor::from_hex(&star_cfg.color, &star_cfg.description.title)?;
        let star = InteractiveBody::star(
            ctx.next_id(),
            scale_radius(star_cfg.radius),
            star_cfg.description.clone(),
        )?;
        staged.push(
            Entity::new(star.id())
                .with_tag(STAR_TAG)
                .with_mesh(MeshComponent::sphere(star.body_radius(), star_color).with_emissive(true)),
        );
        bodies.push(star);

        let mut label_body = 0;
        for planet in &config.planets {
            let color = MeshColor::from_hex(&planet.color, &planet.name)?;
            staged.push(
                Entity::new(ctx.next_id())
                    .with_tag(ORBIT_TAG)
                    .with_mesh(MeshComponent::new(
                        MeshShape::OrbitPath { radius: planet.orbit, tube: ORBIT_TUBE },
                        MeshColor::GRAY,
                    )),
            );
            let body = InteractiveBody::orbiting(
                ctx.next_id(),
                planet.orbital_parameters(),
                planet.description.clone(),
            )?;
            staged.push(
                Entity::new(body.id())
                    .with_tag(planet.name.as_str())
                    .with_pos(body.position())
                    .with_mesh(MeshComponent::sphere(body.body_radius(), color).with_rings(body.has_rings())),
            );
            if planet.name == config.label.body {
                label_body = bodies.len();
            }
            bodies.push(body);
        }

        for entity in staged {
            ctx.scene.spawn(entity);
        }
        let index = bodies.iter().enumerate().map(|(i, b)| (b.id(), i)).collect();

        let mut comet_rain = CometRain::new(config.comet_rain.clone());
        comet_rain.start(ctx);
        let mut flyby = FlybyController::new(ctx.next_id(), config.flyby.clone());
        flyby.start(ctx);

        log::info!(
            "scene composed: {} planets, label on {}",
            config.planets.len(),
            config.label.body
        );

        Ok(Self {
            bodies,
            index,
            comet_rain,
            flyby,
            hover: HoverBroadcast::new(),
            label_body,
            label: config.label.clone(),
            alive: true,
        })
    }

    /// Apply pointer events, stamped with the current frame time.
    pub fn handle_input(&mut self, input: &InputQueue, ctx: &mut EngineContext) {
        if !self.alive {
            return;
        }
        let now = ctx.clock.elapsed();
        for event in input.iter() {
            let changed = match *event {
                InputEvent::PointerMove { x, y } => {
                    self.hover.set_pointer(x, y);
                    false
                }
                InputEvent::PointerEnter { target } => match self.index.get(&target) {
                    Some(&i) => self.bodies[i].on_pointer_enter(now, &mut self.hover),
                    None => false,
                },
                InputEvent::PointerLeave { target } => match self.index.get(&target) {
                    Some(&i) => self.bodies[i].on_pointer_leave(now, &mut self.hover),
                    None => false,
                },
            };
            if changed {
                let owner = self.hover.owner().map(|id| id.0 as f32).unwrap_or(-1.0);
                ctx.emit_event(GameEvent::new(EVENT_HOVER, owner));
            }
        }
    }

    /// One frame: route fired timers, then move bodies, comets and the flyby.
    pub fn tick(&mut self, ctx: &mut EngineContext) {
        if !self.alive {
            return;
        }

        for timer in ctx.fired_timers().to_vec() {
            if self.comet_rain.on_timer(timer, ctx).is_some() {
                continue;
            }
            match self.flyby.on_timer(timer, ctx) {
                Some(transition) => Self::emit_flyby(ctx, transition),
                None => log::trace!("ignoring timer {timer:?}"),
            }
        }

        let elapsed = ctx.clock.elapsed();
        let dt = ctx.clock.delta();
        for body in self.bodies.iter_mut() {
            body.tick(elapsed, dt);
            if let Some(entity) = ctx.scene.get_mut(body.id()) {
                entity.pos = body.position();
                entity.rotation = body.rotation();
            }
        }

        self.comet_rain.tick(ctx);

        if let Some(transition) = self.flyby.tick(ctx) {
            Self::emit_flyby(ctx, transition);
        }
    }

    fn emit_flyby(ctx: &mut EngineContext, transition: FlybyTransition) {
        let a = match transition {
            FlybyTransition::BecameActive => 1.0,
            FlybyTransition::BecameInactive => 0.0,
        };
        ctx.emit_event(GameEvent::new(EVENT_FLYBY, a));
    }

    /// Snapshot for the 2D overlay.
    pub fn overlay(&self) -> OverlayProjection {
        let flyby_active = self.flyby.is_active();
        let body = &self.bodies[self.label_body];
        let text = if flyby_active { &self.label.alert_text } else { &self.label.text };
        let label = AnchorLabel::beside(body.position(), body.body_radius(), text.as_str(), flyby_active);
        self.hover.project(flyby_active, Some(label))
    }

    /// Cancel both timers and drop transient objects. Idempotent.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.comet_rain.stop(ctx);
        self.flyby.stop(ctx);
        log::info!("scene torn down");
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn star(&self) -> &InteractiveBody {
        &self.bodies[0]
    }

    pub fn planets(&self) -> &[InteractiveBody] {
        &self.bodies[1..]
    }

    pub fn body(&self, id: EntityId) -> Option<&InteractiveBody> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn planet(&self, name: &str) -> Option<&InteractiveBody> {
        self.planets().iter().find(|b| b.name() == name)
    }

    pub fn comet_rain(&self) -> &CometRain {
        &self.comet_rain
    }

    pub fn flyby(&self) -> &FlybyController {
        &self.flyby
    }

    pub fn hover(&self) -> &HoverBroadcast {
        &self.hover
    }
}
