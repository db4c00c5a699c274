use super::constants::{PARTICLE_COLORS, PARTICLE_MAX_SPEED, PARTICLE_MIN_SPEED};
use super::types::Particle;
use rand::Rng;

pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    x: f64,
    y: f64,
    count: usize,
    lifetime: u32,
    rng: &mut R,
) {
    particles.reserve(count);
    for index in 0..count {
        let angle = rng.gen::<f64>() * std::f64::consts::PI * 2.0;
        let speed = PARTICLE_MIN_SPEED + rng.gen::<f64>() * (PARTICLE_MAX_SPEED - PARTICLE_MIN_SPEED);
        particles.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: lifetime,
            max_life: lifetime,
            color: PARTICLE_COLORS[index % PARTICLE_COLORS.len()],
        });
    }
}

pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.x += particle.vx;
        particle.y += particle.vy;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|particle| particle.life > 0);
}

pub fn particle_alpha(particle: &Particle) -> f64 {
    if particle.max_life == 0 {
        return 0.0;
    }
    (particle.life as f64 / particle.max_life as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_spawns_requested_count_at_origin() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, 130.0, 50.0, 8, 5, &mut rng);
        assert_eq!(particles.len(), 8);
        for particle in &particles {
            assert_eq!((particle.x, particle.y), (130.0, 50.0));
            assert_eq!(particle.life, 5);
            let speed = (particle.vx.powi(2) + particle.vy.powi(2)).sqrt();
            assert!(speed >= PARTICLE_MIN_SPEED - 1e-9 && speed <= PARTICLE_MAX_SPEED + 1e-9);
        }
    }

    #[test]
    fn particles_move_fade_and_expire() {
        let mut particles = vec![Particle {
            x: 0.0,
            y: 0.0,
            vx: 1.5,
            vy: -2.0,
            life: 2,
            max_life: 4,
            color: PARTICLE_COLORS[0],
        }];
        assert_eq!(particle_alpha(&particles[0]), 0.5);

        advance_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        assert_eq!((particles[0].x, particles[0].y), (1.5, -2.0));
        assert_eq!(particles[0].life, 1);

        advance_particles(&mut particles);
        assert!(particles.is_empty());
    }
}
