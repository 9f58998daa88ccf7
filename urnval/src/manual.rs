/*!

This is the long-form manual for `urnval` and the `urnval` counting program.

## How a count works

1. Each submitted ranking is checked by [crate::normalize_ballot]: it must name
   every candidate of the election exactly once.
2. The preference matrix `d` counts, for every ordered pair of candidates
   (X, Y), the ballots ranking X above Y.
3. The strongest-path matrix `p` is computed with the Schulze method. X beats Y
   directly when `d[X][Y] > d[Y][X]`. A path is as strong as its weakest link.
4. The candidates are ranked: X comes before Y when `p[X][Y] > p[Y][X]`.
5. The ranking is split into primary seats, extra seats and the rest.

### Breaking ties

The strongest paths do not always order every pair. The ranking is built one
position at a time, from the candidates that no remaining candidate beats:

* `firstPreferencesThenId` (default): the candidate ranked first on the most
  ballots, then the smallest candidate id.
* `useCandidateOrder`: the candidate registered first.

A tie is never broken against a defeat: if X beats Y, X is ranked above Y.

### Blank and vacant

An election may have *symbolic* candidates. They are compared with the others
like any candidate, and may end up anywhere in the ranking. Nobody ranked at
or below the first symbolic candidate gets a seat, even when seats remain.

|                | seats                                                   |
|----------------|---------------------------------------------------------|
| primary        | positions `[0, min(mandates, s))`                       |
| secondary      | positions `[mandates, min(mandates + extraMandates, s))` |
| not elected    | the rest                                                |

where `s` is the position of the first symbolic candidate.

### Round-based count

The election can also be counted in stages (`irv`). Each ballot counts for
its highest ranked candidate still running. Ballots resting on the blank
candidate are set aside. The count stops when a candidate holds more than
half of the other ballots; otherwise the regular candidate with the fewest
ballots is eliminated (the one registered last among equals). Blank and vacant
candidates are never eliminated.

## Configuration

The counting program reads a JSON description of the election:

```text
{
  "election": {
    "id": "board-2024",
    "name": "Board election",
    "mandates": 1,
    "extraMandates": 1,
    "finalized": true
  },
  "candidates": [
    { "id": "anna", "name": "Anna" },
    { "id": "bob", "name": "Bob" },
    { "id": "vacant", "name": "Vacant", "symbolic": true }
  ],
  "ballots": [
    { "id": "v1", "ranking": ["anna", "vacant", "bob"] }
  ],
  "ballotSources": [
    {
      "provider": "csv",
      "filePath": "ballots.csv",
      "firstVoteColumnIndex": 2,
      "firstVoteRowIndex": 2,
      "idColumnIndex": 1
    }
  ],
  "rules": {
    "countingMethod": "schulze",
    "tiebreakMode": "firstPreferencesThenId"
  }
}
```

* A symbolic candidate named `Blank` (in any case) is the blank vote. Any other
  symbolic candidate is a vacant seat.
* `extraMandates` defaults to 0. `finalized: false` makes the program refuse to
  count.
* `ballots` and `ballotSources` are both optional and are read in this order.
  The file paths are relative to the configuration file.
* `countingMethod` is `schulze` (default) or `irv`.
* Ballots that do not rank every candidate exactly once are reported and left
  out of the count.

### Ballot sources

`csv`: one ballot per line. The cells from `firstVoteColumnIndex` on hold the
candidate ids, most preferred first. Indices start at 1, and all of them are
optional.

```text
id,choice 1,choice 2,choice 3
v1,anna,vacant,bob
v2,bob,anna,vacant
```

`json`: an array of `{"id": .., "ranking": [..]}` objects. The id is optional.

## Usage

```text
urnval --config election.json [--input ballots.csv --input-type csv]
       [--method schulze|irv] [--out summary.json] [--reference expected.json]
       [--verbose]
```

`--input` replaces the ballots of the configuration file. With `--reference`,
the program fails and prints a diff when the summary differs from the
reference. Logging follows `RUST_LOG`; `--verbose` turns on debug output.

 */
