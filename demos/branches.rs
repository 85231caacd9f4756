//! Left/right branch walkthrough.
//!
//! Builds a seven-state tree, sends a few events that cross between the
//! branches and prints every parent query, entry and exit as it happens.
//!
//! Run with `RUST_LOG=statetree=debug` to also see the engine's own logs.

use statetree::core::State;
use statetree::{state_enum, Hsm, Outbox, Response, Signal, StateMachine};
use tracing_subscriber::EnvFilter;

state_enum! {
    pub enum Branch {
        Top,
        Common,
        LeftBranch1,
        LeftBranch2,
        RightBranch1,
        RightBranch2,
        RightBranch3,
    }
}

#[derive(Debug)]
pub enum BranchEvent {
    One,
    Two,
    Three,
    Back,
    BackAgain,
}

/// Top -> Common -> {LeftBranch1 -> LeftBranch2, RightBranch1 -> RightBranch2 -> RightBranch3}
struct BranchDemo;

impl Hsm for BranchDemo {
    type State = Branch;
    type Event = BranchEvent;

    fn handle(
        &mut self,
        state: Branch,
        signal: Signal<'_, BranchEvent>,
        _outbox: &mut Outbox<'_, BranchEvent>,
    ) -> Response<Self> {
        let parent = match state {
            Branch::Top | Branch::Common => Branch::Top,
            Branch::LeftBranch1 | Branch::RightBranch1 => Branch::Common,
            Branch::LeftBranch2 => Branch::LeftBranch1,
            Branch::RightBranch2 => Branch::RightBranch1,
            Branch::RightBranch3 => Branch::RightBranch2,
        };

        let event = match signal {
            Signal::Parent => {
                println!("{} parent", state.name());
                return Response::Parent(parent);
            }
            Signal::Entry => {
                println!("{} entry", state.name());
                return Response::Handled;
            }
            Signal::Exit => {
                println!("{} exit", state.name());
                return Response::Handled;
            }
            Signal::Event(event) => event,
        };

        match (state, event) {
            (Branch::Top, _) => Response::Handled,
            (Branch::Common, BranchEvent::One) => {
                println!("Common {:?}", event);
                Response::Transition(Branch::RightBranch1)
            }
            (Branch::Common, BranchEvent::BackAgain) => {
                println!("Common {:?}", event);
                Response::Transition(Branch::RightBranch3)
            }
            (Branch::LeftBranch1, BranchEvent::One) => Response::Handled,
            (Branch::LeftBranch1, BranchEvent::Two) => Response::Transition(Branch::LeftBranch2),
            (Branch::LeftBranch2, BranchEvent::Two) => Response::Transition(Branch::RightBranch2),
            (Branch::LeftBranch2, BranchEvent::Three) => {
                Response::Transition(Branch::RightBranch3)
            }
            (Branch::RightBranch3, BranchEvent::Back) => Response::Transition(Branch::LeftBranch1),
            _ => Response::Parent(parent),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("----- Making a new machine");
    let mut machine = StateMachine::new(BranchDemo, Branch::Top, Branch::LeftBranch2);
    machine.start();

    for event in [BranchEvent::Three, BranchEvent::Back, BranchEvent::BackAgain] {
        println!("----- Sending {:?}", event);
        machine.send_event(event);
    }

    println!("----- Dropping the machine");
    drop(machine);
}
