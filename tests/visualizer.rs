// Visualizer engine: clock, modes, the five renderers, particles, and the braille rasterizer.

use chakrabeats::visualizer::audio::{band_index, AudioBuffer, DEFAULT_MAGNITUDE};
use chakrabeats::visualizer::draw::{DrawCommand, Fill, LinearGradient, Rgba, Scene, Stroke, Surface};
use chakrabeats::visualizer::particles::{Chakra, Particle, ParticleSystem, LIFE_DECAY};
use chakrabeats::visualizer::raster::{render_scene, BrailleCanvas};
use chakrabeats::visualizer::{
    bars, flames, rings, waves, AnimationClock, Palette, Visualizer, VisualizerConfig,
    VisualizerMode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn seeded(mode: VisualizerMode) -> Visualizer {
    let mut viz = Visualizer::with_seed(VisualizerConfig::default(), 7);
    viz.set_mode(mode);
    viz
}

fn particle_at(x: f64, y: f64, vx: f64, vy: f64, life: f64) -> Particle {
    Particle {
        x,
        y,
        vx,
        vy,
        size: 4.0,
        life,
        chakra: Chakra::Gold,
    }
}

fn circles(commands: &[DrawCommand]) -> Vec<(f64, f64, f64)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { cx, cy, radius, .. } => Some((*cx, *cy, *radius)),
            _ => None,
        })
        .collect()
}

// ── Modes ────────────────────────────────────────────────────────────────────

#[test]
fn test_mode_ids_round_trip() {
    for mode in VisualizerMode::all() {
        assert_eq!(VisualizerMode::from_id(mode.id()), mode);
    }
    assert_eq!(VisualizerMode::all().len(), 5);
}

#[test]
fn test_unknown_mode_id_falls_back_to_bars() {
    assert_eq!(VisualizerMode::from_id("rainbow_road"), VisualizerMode::Bars);
    assert_eq!(VisualizerMode::from_id(""), VisualizerMode::Bars);
}

#[test]
fn test_mode_cycle_visits_every_mode() {
    let mut mode = VisualizerMode::default();
    let mut seen = vec![mode];
    for _ in 0..4 {
        mode = mode.next();
        seen.push(mode);
    }
    assert_eq!(seen, VisualizerMode::all());
    assert_eq!(mode.next(), VisualizerMode::Bars);
}

#[test]
fn test_mode_labels() {
    assert_eq!(VisualizerMode::Rings.label(), "Sharingan Circle");
    assert_eq!(VisualizerMode::Particles.id(), "particle_system");
}

// ── Clock ────────────────────────────────────────────────────────────────────

#[test]
fn test_clock_is_exact_multiple_of_step() {
    let mut clock = AnimationClock::new(0.05);
    for _ in 0..1000 {
        clock.advance();
    }
    assert_eq!(clock.ticks(), 1000);
    assert_eq!(clock.time(), 1000.0 * 0.05);
}

#[test]
fn test_on_tick_advances_clock_once() {
    let mut viz = seeded(VisualizerMode::Waves);
    for _ in 0..3 {
        viz.on_tick(Surface::from_cells(20, 5));
    }
    assert_eq!(viz.clock().ticks(), 3);
    assert_eq!(viz.clock().time(), 3.0 * 0.05);
}

// ── Controller ───────────────────────────────────────────────────────────────

#[test]
fn test_new_controller_defaults() {
    let viz = Visualizer::with_seed(VisualizerConfig::default(), 1);
    assert_eq!(viz.mode(), VisualizerMode::Bars);
    assert_eq!(viz.audio().len(), 64);
    assert_eq!(viz.particles().len(), 20);
    assert!(viz
        .audio()
        .samples()
        .iter()
        .all(|s| (0.0..DEFAULT_MAGNITUDE).contains(s)));
}

#[test]
fn test_set_mode_by_unknown_id_renders_bars() {
    let mut viz = seeded(VisualizerMode::Rings);
    viz.set_mode_by_id("no_such_mode");
    assert_eq!(viz.mode(), VisualizerMode::Bars);

    viz.on_tick(Surface::from_cells(80, 20));
    // Background plus glow and core per bar.
    assert_eq!(viz.scene().commands.len(), 1 + 2 * 32);
}

#[test]
fn test_every_mode_survives_infinite_surface() {
    for mode in VisualizerMode::all() {
        let mut viz = seeded(mode);
        viz.on_tick(Surface::new(f64::INFINITY, 10.0));
        viz.on_tick(Surface::new(40.0, f64::INFINITY));
        assert_eq!(viz.clock().ticks(), 2);
    }
    assert!(Surface::new(f64::INFINITY, 10.0).is_empty());
    assert!(!Surface::new(2.0, 4.0).is_empty());
    assert!(waves::layer_points(0.0, Surface::new(f64::INFINITY, 10.0), 0).is_empty());
}

#[test]
fn test_every_mode_survives_zero_sized_surface() {
    for mode in VisualizerMode::all() {
        let mut viz = seeded(mode);
        viz.on_tick(Surface::from_cells(0, 0));
        viz.on_tick(Surface::new(f64::NAN, 10.0));
        assert!(matches!(
            viz.scene().commands.first(),
            Some(DrawCommand::Background(_))
        ));
    }
}

#[test]
fn test_empty_audio_update_is_ignored() {
    let mut viz = seeded(VisualizerMode::Bars);
    let before = viz.audio().clone();
    viz.update_audio_data(&[]);
    assert_eq!(viz.audio(), &before);

    viz.update_audio_data(&[0.5; 8]);
    assert_eq!(viz.audio().samples(), &[0.5; 8]);
}

#[test]
fn test_particles_only_move_in_particle_mode() {
    let mut viz = seeded(VisualizerMode::Bars);
    let before = viz.particles().particles().to_vec();
    viz.on_tick(Surface::from_cells(10, 10));
    assert_eq!(viz.particles().particles(), before.as_slice());

    viz.set_mode(VisualizerMode::Particles);
    viz.on_tick(Surface::from_cells(10, 10));
    assert_ne!(viz.particles().particles(), before.as_slice());
}

// ── Audio buffer ─────────────────────────────────────────────────────────────

#[test]
fn test_band_index_maps_64_samples_to_32_bands() {
    for band in 0..32 {
        assert_eq!(band_index(band, 64, 32), band * 2);
    }
    assert_eq!(band_index(3, 64, 0), 0);
}

#[test]
fn test_sample_defaults_when_missing_or_not_finite() {
    let audio = AudioBuffer::from_samples(vec![0.1, f64::NAN, f64::INFINITY]);
    assert_eq!(audio.sample(0), 0.1);
    assert_eq!(audio.sample(1), DEFAULT_MAGNITUDE);
    assert_eq!(audio.sample(2), DEFAULT_MAGNITUDE);
    assert_eq!(audio.sample(99), DEFAULT_MAGNITUDE);
}

// ── Bars ─────────────────────────────────────────────────────────────────────

#[test]
fn test_bar_height_reads_every_second_sample() {
    let audio = AudioBuffer::from_samples((0..64).map(|i| i as f64 / 100.0).collect());
    let clock = 1.25;
    for i in 0..32 {
        let expected = (audio.sample(2 * i) + 0.2 * (clock + i as f64 * 0.3).sin()).clamp(0.1, 1.0);
        assert_eq!(bars::column_height(clock, i, &audio, 32), expected);
    }
}

#[test]
fn test_bar_heights_are_clamped() {
    let loud = AudioBuffer::from_samples(vec![5.0; 64]);
    let silent = AudioBuffer::from_samples(vec![-5.0; 64]);
    assert!(bars::column_heights(0.0, &loud, 32).iter().all(|h| *h == 1.0));
    assert!(bars::column_heights(0.0, &silent, 32).iter().all(|h| *h == 0.1));
}

#[test]
fn test_bar_geometry() {
    let audio = AudioBuffer::from_samples(vec![0.5; 64]);
    let surface = Surface::new(320.0, 100.0);
    let commands = bars::render(0.0, surface, &audio, 32, &Palette::default());

    let DrawCommand::Rect { x, y, w, h, .. } = &commands[1] else {
        panic!("expected glow rect");
    };
    let height = bars::column_height(0.0, 0, &audio, 32);
    let bar_px = (height * 100.0 * 0.7).floor();
    assert_eq!((*x, *w), (0.0, 9.0));
    assert_eq!(*h, bar_px);
    assert_eq!(*y, 100.0 - bar_px);

    let DrawCommand::Rect { x, w, .. } = &commands[3] else {
        panic!("expected second glow rect");
    };
    assert_eq!((*x, *w), (10.0, 9.0));
}

// ── Rings ────────────────────────────────────────────────────────────────────

#[test]
fn test_ring_geometry() {
    let surface = Surface::new(120.0, 90.0);
    let max_r = rings::max_radius(surface);
    assert_eq!(max_r, 30.0);

    let clock = 0.4;
    let commands = rings::render(clock, surface, &Palette::default());
    assert_eq!(commands.len(), 1 + rings::RING_COUNT + rings::TOMOE_COUNT);

    let found = circles(&commands);
    for (i, (cx, cy, r)) in found.iter().take(rings::RING_COUNT).enumerate() {
        assert_eq!((*cx, *cy), (60.0, 45.0));
        assert_eq!(*r, 30.0 * (i + 1) as f64 / 5.0 + 10.0 * (clock + i as f64).sin());
    }
}

#[test]
fn test_tomoe_orbit_at_seventy_percent() {
    for i in 0..rings::TOMOE_COUNT {
        let (x, y) = rings::tomoe_position(1.0, i, 60.0, 45.0, 30.0);
        let dist = ((x - 60.0).powi(2) + (y - 45.0).powi(2)).sqrt();
        assert!((dist - 21.0).abs() < 1e-9);
    }
    let a = rings::tomoe_position(0.0, 0, 0.0, 0.0, 10.0);
    let b = rings::tomoe_position(0.0, 1, 0.0, 0.0, 10.0);
    let angle = b.1.atan2(b.0) - a.1.atan2(a.0);
    assert!((angle - std::f64::consts::TAU / 3.0).abs() < 1e-9);
}

// ── Waves ────────────────────────────────────────────────────────────────────

#[test]
fn test_wave_points_every_five_dots() {
    let surface = Surface::new(100.0, 80.0);
    let points = waves::layer_points(0.0, surface, 0);
    assert_eq!(points.len(), 20);
    assert_eq!(points[1].0 - points[0].0, 5.0);
    assert_eq!(points[0].1, 40.0);
}

#[test]
fn test_wave_amplitude_grows_per_layer() {
    let surface = Surface::new(400.0, 100.0);
    for layer in 0..waves::LAYERS {
        let amplitude = 100.0 * 0.1 * (layer + 1) as f64;
        assert!(waves::layer_points(0.3, surface, layer)
            .iter()
            .all(|(_, y)| (y - 50.0).abs() <= amplitude + 1e-9));
    }
    let commands = waves::render(0.0, Surface::new(100.0, 80.0), &Palette::default());
    assert_eq!(commands.len(), 1 + 3 * 19);
}

// ── Flames ───────────────────────────────────────────────────────────────────

#[test]
fn test_flames_emit_fifty_embers() {
    let mut rng = StdRng::seed_from_u64(3);
    let surface = Surface::new(200.0, 100.0);
    let commands = flames::render(surface, 50, &Palette::default(), &mut rng);
    let embers = circles(&commands);
    assert_eq!(embers.len(), 50);
    for (x, y, r) in embers {
        assert!((0.0..200.0).contains(&x));
        assert!((0.0..100.0).contains(&y));
        assert!((1.0..7.5).contains(&r));
    }
}

#[test]
fn test_flames_on_empty_surface_only_paint_background() {
    let mut rng = StdRng::seed_from_u64(3);
    let commands = flames::render(Surface::new(0.0, 0.0), 50, &Palette::default(), &mut rng);
    assert_eq!(commands.len(), 1);
}

// ── Particles ────────────────────────────────────────────────────────────────

#[test]
fn test_particle_count_is_constant() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut system = ParticleSystem::initialize(20, &mut rng);
    for _ in 0..500 {
        assert_eq!(system.advance(&mut rng), 20);
    }
    assert_eq!(system.len(), 20);
}

#[test]
fn test_particle_life_stays_positive_and_bounded() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut system = ParticleSystem::initialize(20, &mut rng);
    for _ in 0..300 {
        system.advance(&mut rng);
        for p in system.particles() {
            assert!(p.life > 0.0 && p.life <= 1.0, "life {}", p.life);
        }
    }
}

#[test]
fn test_particle_life_decays_per_tick() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut system = ParticleSystem::initialize(1, &mut rng);
    let before = system.particles()[0].life;
    system.advance(&mut rng);
    let after = system.particles()[0].life;
    if before > LIFE_DECAY {
        assert!((before - after - LIFE_DECAY).abs() < 1e-12);
    }
}

#[test]
fn test_particles_stay_near_unit_square() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut system = ParticleSystem::initialize(20, &mut rng);
    for _ in 0..2000 {
        system.advance(&mut rng);
        for p in system.particles() {
            assert!((-0.02..=1.02).contains(&p.x), "x {}", p.x);
            assert!((-0.02..=1.02).contains(&p.y), "y {}", p.y);
            assert!(p.vx.abs() <= 0.02 && p.vy.abs() <= 0.02);
        }
    }
}

#[test]
fn test_particle_reflects_off_right_edge_without_clamping() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut system = ParticleSystem::from_particles(vec![particle_at(0.99, 0.5, 0.02, 0.0, 1.0)]);

    system.advance(&mut rng);
    let p = system.particles()[0];
    assert!((p.x - 1.01).abs() < 1e-12, "x {}", p.x);
    assert_eq!(p.vx, -0.02);
    assert_eq!(p.y, 0.5);

    // Already heading back in: no second flip.
    system.advance(&mut rng);
    let p = system.particles()[0];
    assert!((p.x - 0.99).abs() < 1e-12, "x {}", p.x);
    assert_eq!(p.vx, -0.02);
}

#[test]
fn test_particle_reflects_off_top_left_corner() {
    let mut rng = StdRng::seed_from_u64(16);
    let mut system =
        ParticleSystem::from_particles(vec![particle_at(0.01, 0.005, -0.02, -0.01, 1.0)]);

    system.advance(&mut rng);
    let p = system.particles()[0];
    assert!((p.x + 0.01).abs() < 1e-12, "x {}", p.x);
    assert!((p.y + 0.005).abs() < 1e-12, "y {}", p.y);
    assert_eq!(p.vx, 0.02);
    assert_eq!(p.vy, 0.01);
}

#[test]
fn test_expired_particle_respawns_in_place() {
    let mut rng = StdRng::seed_from_u64(17);
    let steady = particle_at(0.5, 0.5, 0.01, 0.0, 0.8);
    let mut system = ParticleSystem::from_particles(vec![
        particle_at(0.3, 0.7, 0.015, -0.01, 0.005),
        steady,
    ]);

    assert_eq!(system.advance(&mut rng), 2);
    let reborn = system.particles()[0];
    assert!((0.5..=1.0).contains(&reborn.life), "life {}", reborn.life);
    assert!((0.0..1.0).contains(&reborn.x));
    assert!((0.0..1.0).contains(&reborn.y));
    assert_eq!(reborn.vx, 0.015);
    assert_eq!(reborn.vy, -0.01);
    assert_eq!(reborn.size, 4.0);

    let other = system.particles()[1];
    assert!((other.x - 0.51).abs() < 1e-12);
    assert!((other.life - (0.8 - LIFE_DECAY)).abs() < 1e-12);
}

#[test]
fn test_particle_alpha_follows_life() {
    let mut viz = seeded(VisualizerMode::Particles);
    viz.on_tick(Surface::new(100.0, 100.0));
    let particles = viz.particles().particles().to_vec();
    for (p, cmd) in particles.iter().zip(&viz.scene().commands[1..]) {
        let DrawCommand::Circle { fill: Some(Fill::Solid(c)), radius, .. } = cmd else {
            panic!("expected particle circle");
        };
        assert_eq!(c.a, (255.0 * p.life) as u8);
        assert_eq!(*radius, p.size / 2.0);
    }
}

// ── Drawing primitives ───────────────────────────────────────────────────────

#[test]
fn test_hex_parsing() {
    assert_eq!(Rgba::hex("#FFD700"), Rgba::rgb(255, 215, 0));
    assert_eq!(Rgba::hex("nope"), Rgba::rgb(0, 0, 0));
    assert_eq!(Rgba::hex("#ééé"), Rgba::rgb(0, 0, 0));
}

#[test]
fn test_gradient_interpolates_between_stops() {
    let g = LinearGradient::new((0.0, 0.0), (10.0, 0.0))
        .stop(0.0, Rgba::rgb(0, 0, 0))
        .stop(1.0, Rgba::rgb(200, 100, 0));
    assert_eq!(g.color_at(0.0, 5.0), Rgba::rgb(0, 0, 0));
    assert_eq!(g.color_at(5.0, 0.0), Rgba::rgb(100, 50, 0));
    assert_eq!(g.color_at(50.0, 0.0), Rgba::rgb(200, 100, 0));
}

#[test]
fn test_over_blends_by_alpha() {
    let black = Rgba::rgb(0, 0, 0);
    assert_eq!(Rgba::rgba(255, 255, 255, 0).over(black), black);
    assert_eq!(Rgba::rgb(255, 255, 255).over(black), Rgba::rgb(255, 255, 255));
    assert_eq!(Rgba::rgba(255, 255, 255, 128).over(black), Rgba::rgb(128, 128, 128));
}

// ── Rasterizer ───────────────────────────────────────────────────────────────

#[test]
fn test_canvas_dimensions() {
    let canvas = BrailleCanvas::new(10, 3);
    assert_eq!(canvas.dot_width(), 20);
    assert_eq!(canvas.dot_height(), 12);
    assert!(canvas.cell(10, 0).is_none());
}

#[test]
fn test_full_rect_lights_every_dot() {
    let mut canvas = BrailleCanvas::new(2, 1);
    canvas.paint(&DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        w: 4.0,
        h: 4.0,
        fill: Fill::Solid(Rgba::rgb(255, 255, 255)),
    });
    for col in 0..2 {
        let cell = canvas.cell(col, 0).unwrap();
        assert_eq!(cell.dots, 0xFF);
        assert_eq!(cell.glyph(), '⣿');
        assert_eq!(cell.fg, Some(Rgba::rgb(255, 255, 255)));
    }
}

#[test]
fn test_single_dot_bits() {
    let mut canvas = BrailleCanvas::new(1, 1);
    canvas.paint(&DrawCommand::Rect {
        x: 1.0,
        y: 3.0,
        w: 1.0,
        h: 1.0,
        fill: Fill::Solid(Rgba::rgb(1, 2, 3)),
    });
    assert_eq!(canvas.cell(0, 0).unwrap().dots, 0x80);
}

#[test]
fn test_background_sets_cell_colour_without_dots() {
    let mut canvas = BrailleCanvas::new(3, 2);
    canvas.paint(&DrawCommand::Background(Fill::Solid(Rgba::rgb(10, 20, 30))));
    let cell = canvas.cell(2, 1).unwrap();
    assert_eq!(cell.dots, 0);
    assert_eq!(cell.bg, Some(Rgba::rgb(10, 20, 30)));
}

#[test]
fn test_degenerate_geometry_is_skipped() {
    let mut canvas = BrailleCanvas::new(4, 4);
    canvas.paint(&DrawCommand::Circle {
        cx: 4.0,
        cy: 8.0,
        radius: f64::NAN,
        fill: Some(Fill::Solid(Rgba::rgb(255, 0, 0))),
        stroke: None,
    });
    canvas.paint(&DrawCommand::Circle {
        cx: 4.0,
        cy: 8.0,
        radius: -3.0,
        fill: Some(Fill::Solid(Rgba::rgb(255, 0, 0))),
        stroke: None,
    });
    canvas.paint(&DrawCommand::Line {
        from: (0.0, 0.0),
        to: (f64::INFINITY, 3.0),
        stroke: Stroke {
            color: Rgba::rgb(255, 0, 0),
            width: 1.0,
        },
    });
    for row in 0..4 {
        for col in 0..4 {
            assert_eq!(canvas.cell(col, row).unwrap().dots, 0);
        }
    }
}

#[test]
fn test_circle_stroke_leaves_centre_empty() {
    let mut canvas = BrailleCanvas::new(20, 10);
    canvas.paint(&DrawCommand::Circle {
        cx: 20.0,
        cy: 20.0,
        radius: 15.0,
        fill: None,
        stroke: Some(Stroke {
            color: Rgba::rgb(255, 255, 255),
            width: 2.0,
        }),
    });
    assert_eq!(canvas.cell(10, 5).unwrap().dots, 0);
    assert_ne!(canvas.cell(2, 5).unwrap().dots, 0);
}

#[test]
fn test_render_scene_writes_buffer() {
    let scene = Scene {
        surface: Surface::from_cells(4, 2),
        commands: vec![
            DrawCommand::Background(Fill::Solid(Rgba::rgb(255, 0, 0))),
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 2.0,
                h: 4.0,
                fill: Fill::Solid(Rgba::rgb(255, 255, 255)),
            },
        ],
    };
    let area = Rect::new(0, 0, 4, 2);
    let mut buf = Buffer::empty(area);
    render_scene(&scene, &mut buf, area);

    assert_eq!(buf[(0, 0)].symbol(), "⣿");
    assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 255, 255));
    assert_eq!(buf[(0, 0)].bg, Color::Rgb(255, 0, 0));
    assert_eq!(buf[(1, 0)].symbol(), " ");
    assert_eq!(buf[(1, 0)].bg, Color::Rgb(255, 0, 0));
}

#[test]
fn test_every_mode_rasterizes() {
    for mode in VisualizerMode::all() {
        let mut viz = seeded(mode);
        let area = Rect::new(0, 0, 40, 12);
        viz.on_tick(Surface::from_cells(area.width, area.height));
        let mut buf = Buffer::empty(area);
        render_scene(viz.scene(), &mut buf, area);
        let lit = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() != " ")
            .count();
        assert!(lit > 0, "{:?} drew nothing", mode);
    }
}
