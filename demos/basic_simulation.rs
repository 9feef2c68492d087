//! Basic physics simulation example
//!
//! A ball bounces on a floor while a crate slides into a trigger zone.

use rustphy2d::prelude::*;

/// Prints every enter and exit as it happens
struct Printer;

impl ContactListener for Printer {
    fn on_collision_enter(&mut self, entity: EntityHandle, event: &CollisionEvent) {
        println!(
            "  {:?} hit {:?} (normal ({:.2}, {:.2}), depth {:.3})",
            entity, event.other_entity, event.normal.x, event.normal.y, event.penetration
        );
    }

    fn on_collision_exit(&mut self, entity: EntityHandle, event: &CollisionEvent) {
        println!("  {:?} left {:?}", entity, event.other_entity);
    }

    fn on_trigger_enter(&mut self, entity: EntityHandle, event: &TriggerEvent) {
        println!("  {:?} entered trigger {:?}", entity, event.other_entity);
    }

    fn on_trigger_exit(&mut self, entity: EntityHandle, event: &TriggerEvent) {
        println!("  {:?} exited trigger {:?}", entity, event.other_entity);
    }
}

fn main() -> rustphy2d::Result<()> {
    println!("RustPhy2D - Basic Simulation Example");
    println!("====================================\n");

    let mut world = World::default();
    let mut transforms = Transforms::new();

    // Static floor, top surface at y = 400
    let floor = transforms.spawn_at(Vec2::new(0.0, 410.0));
    world.register_body(floor, RigidBodyDesc::fixed())?;
    world.register_shape(floor, ShapeDesc::cuboid(Vec2::new(600.0, 10.0)));
    println!("Created floor (top surface at y=400)");

    // Bouncy ball
    let ball = transforms.spawn_at(Vec2::new(0.0, 100.0));
    let ball_body = world.register_body(ball, RigidBodyDesc::dynamic())?;
    world.register_shape(
        ball,
        ShapeDesc::circle(15.0).with_material(Material::bouncy(0.7)),
    );
    println!("Created ball at y=100 (radius=15, restitution=0.7)");

    // Crate pushed to the right, with a trigger zone in its way
    let crate_entity = transforms.spawn_at(Vec2::new(-300.0, 380.0));
    let crate_body = world.register_body(crate_entity, RigidBodyDesc::dynamic().with_mass(4.0))?;
    world.register_shape(crate_entity, ShapeDesc::cuboid(Vec2::new(20.0, 20.0)));
    if let Some(body) = world.body_mut(crate_body) {
        body.add_impulse(Vec2::new(1600.0, 0.0));
    }

    let zone = transforms.spawn_at(Vec2::new(-150.0, 370.0));
    world.register_shape(zone, ShapeDesc::cuboid(Vec2::new(30.0, 30.0)).trigger());
    println!("Created crate at x=-300 moving right, trigger zone at x=-150\n");

    let dt = 1.0 / 60.0;
    let total_time = 4.0;
    let frames = (total_time / dt) as usize;
    println!("Simulating {total_time} seconds ({frames} frames at {}Hz)...\n", 1.0 / dt);

    let mut printer = Printer;
    for frame in 0..frames {
        world.step(dt, &mut transforms, &mut printer);

        // Report every half second
        if frame % 30 == 0 {
            let position = transforms.position(ball).unwrap_or(Vec2::ZERO);
            let velocity = world.body(ball_body).map_or(Vec2::ZERO, |b| b.velocity());
            println!(
                "t={:.2}s: ball position=({:.1}, {:.1}), velocity=({:.1}, {:.1})",
                world.time(),
                position.x,
                position.y,
                velocity.x,
                velocity.y
            );
        }
    }

    let ball_position = transforms.position(ball).unwrap_or(Vec2::ZERO);
    let crate_position = transforms.position(crate_entity).unwrap_or(Vec2::ZERO);
    println!("\nFinal ball position: ({:.1}, {:.1})", ball_position.x, ball_position.y);
    println!("Expected resting height: ~385 (floor top at 400 - radius 15)");
    println!("Final crate position: ({:.1}, {:.1})", crate_position.x, crate_position.y);

    if let Some(hit) = world.raycast(Vec2::new(0.0, 0.0), Vec2::Y, 1000.0) {
        println!(
            "Ray straight down hits {:?} at distance {:.1}",
            hit.entity, hit.distance
        );
    }

    Ok(())
}
