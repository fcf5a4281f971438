//! Kitchen construction: the make-table container grid, assembly zones,
//! and ovens, all spawned from catalog records.

use std::fmt;

use hecs::{Entity, World};

use pizzashop_logic::types::PizzaSize;

use crate::catalog::DataCatalog;
use crate::components::{AssemblyZone, Container, Oven};

/// 2D occupancy grid of container slots on the make table
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    depth: u32,
    cells: Vec<Option<Entity>>,
}

impl Grid {
    pub fn new(width: u32, depth: u32) -> Self {
        Self {
            width,
            depth,
            cells: vec![None; (width * depth) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_valid_cell(&self, x: u32, z: u32) -> bool {
        x < self.width && z < self.depth
    }

    fn index(&self, x: u32, z: u32) -> usize {
        (z * self.width + x) as usize
    }

    pub fn cell(&self, x: u32, z: u32) -> Option<Entity> {
        if !self.is_valid_cell(x, z) {
            return None;
        }
        self.cells[self.index(x, z)]
    }

    pub fn is_cell_occupied(&self, x: u32, z: u32) -> bool {
        self.cell(x, z).is_some()
    }

    pub fn set_cell(&mut self, x: u32, z: u32, entity: Entity) {
        if !self.is_valid_cell(x, z) {
            log::warn!("invalid grid cell ({}, {})", x, z);
            return;
        }
        let index = self.index(x, z);
        self.cells[index] = Some(entity);
    }

    pub fn clear_cell(&mut self, x: u32, z: u32) {
        if self.is_valid_cell(x, z) {
            let index = self.index(x, z);
            self.cells[index] = None;
        }
    }

    /// First free cell in row-major order
    pub fn first_empty_cell(&self) -> Option<(u32, u32)> {
        self.cells
            .iter()
            .position(|c| c.is_none())
            .map(|i| (i as u32 % self.width, i as u32 / self.width))
    }

    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// All occupied cells with their entities
    pub fn occupied(&self) -> impl Iterator<Item = ((u32, u32), Entity)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            c.map(|e| ((i as u32 % self.width, i as u32 / self.width), e))
        })
    }
}

/// One container to place during kitchen setup
#[derive(Debug, Clone)]
pub struct ContainerPlacement {
    pub container_type: String,
    /// Pre-assign an ingredient and start with the type's initial servings
    pub ingredient: Option<String>,
    pub cell: (u32, u32),
}

/// Declarative kitchen setup resolved against the catalog
#[derive(Debug, Clone)]
pub struct KitchenSetup {
    pub make_table: String,
    pub ovens: Vec<String>,
    pub containers: Vec<ContainerPlacement>,
}

/// Entity handles for everything the kitchen build spawned
#[derive(Debug)]
pub struct KitchenLayout {
    pub containers: Grid,
    pub zones: Vec<Entity>,
    pub ovens: Vec<Entity>,
}

/// Errors during kitchen construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KitchenError {
    UnknownMakeTable(String),
    UnknownOven(String),
    UnknownContainerType(String),
    UnknownIngredient(String),
    InvalidCell { x: u32, z: u32 },
    CellOccupied { x: u32, z: u32 },
}

impl fmt::Display for KitchenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitchenError::UnknownMakeTable(id) => write!(f, "make table not found: {}", id),
            KitchenError::UnknownOven(id) => write!(f, "oven not found: {}", id),
            KitchenError::UnknownContainerType(id) => {
                write!(f, "container type not found: {}", id)
            }
            KitchenError::UnknownIngredient(id) => write!(f, "ingredient not found: {}", id),
            KitchenError::InvalidCell { x, z } => write!(f, "invalid grid cell ({}, {})", x, z),
            KitchenError::CellOccupied { x, z } => {
                write!(f, "grid cell ({}, {}) is occupied", x, z)
            }
        }
    }
}

impl std::error::Error for KitchenError {}

/// Spawn the whole kitchen into the world.
///
/// Assembly zones are distributed along the back row of the make-table
/// grid, each supporting the size configured at its index (defaulting to
/// Large past the end of the list).
pub fn build_kitchen(
    world: &mut World,
    catalog: &DataCatalog,
    setup: &KitchenSetup,
) -> Result<KitchenLayout, KitchenError> {
    let table = catalog
        .try_get_make_table(&setup.make_table)
        .ok_or_else(|| KitchenError::UnknownMakeTable(setup.make_table.clone()))?;

    let mut grid = Grid::new(table.grid_width.max(1), table.grid_depth.max(1));

    // Zones along the back row
    let zone_row = grid.depth() - 1;
    let zone_count = table.assembly_zone_count.clamp(1, grid.width());
    let mut zones = Vec::with_capacity(zone_count as usize);
    for i in 0..zone_count {
        let x = i * (grid.width() / zone_count);
        let size = table
            .supported_sizes
            .get(i as usize)
            .copied()
            .unwrap_or(PizzaSize::Large);
        zones.push(world.spawn((AssemblyZone::new((x, zone_row), size),)));
    }

    // Containers at their requested cells
    for placement in &setup.containers {
        let record = catalog
            .try_get_container(&placement.container_type)
            .ok_or_else(|| KitchenError::UnknownContainerType(placement.container_type.clone()))?;

        if let Some(ingredient) = &placement.ingredient {
            if catalog.try_get_ingredient(ingredient).is_none() {
                return Err(KitchenError::UnknownIngredient(ingredient.clone()));
            }
        }

        let (x, z) = placement.cell;
        if !grid.is_valid_cell(x, z) {
            return Err(KitchenError::InvalidCell { x, z });
        }
        if grid.is_cell_occupied(x, z) {
            return Err(KitchenError::CellOccupied { x, z });
        }

        let container = match &placement.ingredient {
            Some(ingredient) => Container::prefilled(record, ingredient),
            None => Container::new(record),
        };
        let entity = world.spawn((container,));
        grid.set_cell(x, z, entity);
    }

    // Ovens
    let mut ovens = Vec::with_capacity(setup.ovens.len());
    for oven_id in &setup.ovens {
        let config = catalog
            .try_get_oven(oven_id)
            .ok_or_else(|| KitchenError::UnknownOven(oven_id.clone()))?;
        ovens.push(world.spawn((Oven::new(config),)));
    }

    log::info!(
        "kitchen built: {}x{} grid, {} zones, {} containers, {} ovens",
        grid.width(),
        grid.depth(),
        zones.len(),
        setup.containers.len(),
        ovens.len()
    );

    Ok(KitchenLayout {
        containers: grid,
        zones,
        ovens,
    })
}
